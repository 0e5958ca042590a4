//! Markdown report rendering

use super::AuditReport;
use std::fmt::Write;

pub fn generate(report: &AuditReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Rapport d'audit anti-greenwashing");
    let _ = writeln!(out, "Directive EmpCo (EU 2024/825)\n");
    let _ = writeln!(out, "**{}** — Secteur : {}", report.company_name, report.sector);
    if let Some(completed_at) = report.completed_at {
        let _ = writeln!(out, "Audit réalisé le {}", completed_at.format("%d/%m/%Y"));
    }
    let _ = writeln!(
        out,
        "\n**Score global : {:.2}/100 — Risque {}**\n",
        report.summary.global_score, report.summary.risk_level
    );

    // 1. Executive summary
    let _ = writeln!(out, "## 1. Synthèse exécutive\n");
    let _ = writeln!(out, "| Allégations | Conformes | À risque | Non conformes |");
    let _ = writeln!(out, "|---|---|---|---|");
    let s = &report.summary;
    let _ = writeln!(
        out,
        "| {} | {} ({}%) | {} ({}%) | {} ({}%) |",
        s.total_claims,
        s.conforming_claims,
        s.conforming_pct,
        s.at_risk_claims,
        s.at_risk_pct,
        s.non_conforming_claims,
        s.non_conforming_pct
    );
    let _ = writeln!(out, "\n{}\n", s.summary_phrase);

    // 2. Claim details
    let _ = writeln!(out, "## 2. Détail des allégations\n");
    for section in &report.claims {
        let _ = writeln!(
            out,
            "### Allégation #{} — {}\n",
            section.index, section.verdict_label
        );
        let _ = writeln!(out, "> « {} »\n", section.claim_text);
        let _ = writeln!(
            out,
            "Support : {} | Portée : {}\n",
            section.support_label, section.scope_label
        );
        let _ = writeln!(out, "| Critère | Verdict | Explication | Recommandation |");
        let _ = writeln!(out, "|---|---|---|---|");
        for row in &section.rows {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                row.criterion_label,
                row.verdict_label,
                row.explanation,
                row.recommendation.as_deref().unwrap_or("—")
            );
        }
        let _ = writeln!(out);
    }

    // 3. Correction plan
    let _ = writeln!(out, "## 3. Plan de correction priorisé\n");
    if report.correction_plan.is_empty() {
        let _ = writeln!(out, "Aucune action corrective nécessaire.\n");
    } else {
        let _ = writeln!(out, "| Priorité | Allégation | Critère | Action corrective |");
        let _ = writeln!(out, "|---|---|---|---|");
        for action in &report.correction_plan {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                action.priority, action.claim_excerpt, action.criterion_label, action.action
            );
        }
        let _ = writeln!(out);
    }

    // 4. Labels checklist
    let checklist = &report.labels_checklist;
    if !checklist.to_remove.is_empty() || !checklist.to_keep.is_empty() {
        let _ = writeln!(out, "## 4. Checklist labels\n");
        if !checklist.to_remove.is_empty() {
            let _ = writeln!(out, "Labels à retirer (auto-décernés) :");
            for name in &checklist.to_remove {
                let _ = writeln!(out, "- {}", name);
            }
            let _ = writeln!(out);
        }
        if !checklist.to_keep.is_empty() {
            let _ = writeln!(out, "Labels conformes à conserver :");
            for name in &checklist.to_keep {
                let _ = writeln!(out, "- {}", name);
            }
            let _ = writeln!(out);
        }
    }

    // 5. Regulatory references
    let _ = writeln!(out, "## 5. Références réglementaires\n");
    let _ = writeln!(out, "| Texte | Référence | Objet |");
    let _ = writeln!(out, "|---|---|---|");
    for entry in &report.references {
        let _ = writeln!(out, "| {} | {} | {} |", entry.text, entry.reference, entry.object);
    }

    // Disclaimer
    let _ = writeln!(out, "\n## Avertissement\n");
    let _ = writeln!(
        out,
        "Ce rapport est un outil d'aide à la conformité et ne constitue pas \
         un conseil juridique. Il est recommandé de consulter un avocat \
         spécialisé pour toute question relative à la conformité réglementaire \
         de vos communications environnementales."
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{AnalyzedClaim, AuditSummary};
    use crate::{analyze_claim, Claim, RiskLevel};
    use uuid::Uuid;

    #[test]
    fn test_markdown_report_sections() {
        let claim = Claim {
            claim_text: "Notre produit est écologique".to_string(),
            ..Claim::default()
        };
        let analysis = analyze_claim(&claim);
        let analyzed = AnalyzedClaim {
            claim,
            overall: analysis.overall,
            results: analysis.results.to_vec(),
        };
        let summary = AuditSummary {
            audit_id: Uuid::new_v4(),
            company_name: "Acme".to_string(),
            sector: "e-commerce".to_string(),
            total_claims: 1,
            conforming_claims: 0,
            at_risk_claims: 0,
            non_conforming_claims: 1,
            global_score: 0.0,
            risk_level: RiskLevel::Critique,
            completed_at: None,
        };
        let report = AuditReport::build(&summary, &[analyzed]);
        let rendered = generate(&report);

        assert!(rendered.contains("# Rapport d'audit anti-greenwashing"));
        assert!(rendered.contains("## 1. Synthèse exécutive"));
        assert!(rendered.contains("Allégation #1 — Non conforme"));
        assert!(rendered.contains("## 3. Plan de correction priorisé"));
        assert!(rendered.contains("## 5. Références réglementaires"));
    }
}

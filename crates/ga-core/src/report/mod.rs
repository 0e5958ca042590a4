//! Audit report generation
//!
//! Builds a structured report from an audit aggregate and its analyzed
//! claims, then renders it as JSON or Markdown. Rendering to richer
//! formats (PDF, branded documents) is the caller's concern.

pub mod json;
pub mod markdown;

use crate::claim::{Claim, CriterionResult};
use crate::{CoreResult, RiskLevel, Verdict, ALL_CRITERIA};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
}

/// Audit aggregate as persisted by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSummary {
    pub audit_id: Uuid,
    pub company_name: String,
    pub sector: String,
    pub total_claims: u32,
    pub conforming_claims: u32,
    pub at_risk_claims: u32,
    pub non_conforming_claims: u32,
    pub global_score: f64,
    pub risk_level: RiskLevel,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A claim together with its analysis outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedClaim {
    pub claim: Claim,
    pub overall: Verdict,
    pub results: Vec<CriterionResult>,
}

/// Executive summary section
#[derive(Debug, Clone, Serialize)]
pub struct SummarySection {
    pub total_claims: u32,
    pub conforming_claims: u32,
    pub conforming_pct: u32,
    pub at_risk_claims: u32,
    pub at_risk_pct: u32,
    pub non_conforming_claims: u32,
    pub non_conforming_pct: u32,
    pub global_score: f64,
    pub risk_level: RiskLevel,
    pub summary_phrase: String,
}

/// One criterion row in a claim's detail table
#[derive(Debug, Clone, Serialize)]
pub struct CriterionRow {
    pub criterion_label: String,
    pub verdict_label: String,
    pub explanation: String,
    pub recommendation: Option<String>,
    pub regulation_reference: Option<String>,
}

/// Per-claim detail section
#[derive(Debug, Clone, Serialize)]
pub struct ClaimSection {
    pub index: usize,
    pub claim_text: String,
    pub support_label: String,
    pub scope_label: String,
    pub verdict_label: String,
    pub rows: Vec<CriterionRow>,
}

/// One prioritized corrective action
#[derive(Debug, Clone, Serialize)]
pub struct CorrectionAction {
    pub priority: String,
    pub claim_excerpt: String,
    pub criterion_label: String,
    pub action: String,
}

/// Labels to remove (self-awarded) vs keep (certified)
#[derive(Debug, Clone, Default, Serialize)]
pub struct LabelsChecklist {
    pub to_remove: Vec<String>,
    pub to_keep: Vec<String>,
}

/// One regulatory reference row
#[derive(Debug, Clone, Serialize)]
pub struct RegulationEntry {
    pub text: &'static str,
    pub reference: &'static str,
    pub object: &'static str,
}

/// Complete structured audit report
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub audit_id: Uuid,
    pub company_name: String,
    pub sector: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub summary: SummarySection,
    pub claims: Vec<ClaimSection>,
    pub correction_plan: Vec<CorrectionAction>,
    pub labels_checklist: LabelsChecklist,
    pub references: Vec<RegulationEntry>,
}

/// Risk-level summary phrase for the executive summary.
fn summary_phrase(risk_level: RiskLevel) -> &'static str {
    match risk_level {
        RiskLevel::Faible => "La majorité des allégations sont conformes.",
        RiskLevel::Modere => "Plusieurs allégations nécessitent des corrections.",
        RiskLevel::Eleve => {
            "Un nombre significatif d'allégations sont non conformes. \
             Actions correctives urgentes recommandées."
        }
        RiskLevel::Critique => {
            "Situation critique. La majorité des allégations exposent \
             l'entreprise à des sanctions."
        }
    }
}

/// Static regulatory references table.
fn regulation_references() -> Vec<RegulationEntry> {
    vec![
        RegulationEntry {
            text: "Directive EmpCo",
            reference: "EU 2024/825",
            object: "Interdiction allégations trompeuses, labels auto-décernés, \
                     neutralité carbone par compensation",
        },
        RegulationEntry {
            text: "Loi AGEC",
            reference: "Loi n° 2020-105",
            object: "Interdiction mentions « biodégradable » et « respectueux de \
                     l'environnement » (Art. 13)",
        },
        RegulationEntry {
            text: "Guide ADEME 2025",
            reference: "Recommandations",
            object: "Bonnes pratiques de communication environnementale",
        },
        RegulationEntry {
            text: "Code de la consommation",
            reference: "Art. L121-1+",
            object: "Pratiques commerciales trompeuses",
        },
    ]
}

fn percentage(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64) * 100.0 / (total as f64)).round() as u32
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let truncated: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        format!("{}…", truncated)
    } else {
        truncated
    }
}

impl AuditReport {
    /// Assemble the full report from the audit aggregate and claims.
    pub fn build(summary: &AuditSummary, claims: &[AnalyzedClaim]) -> Self {
        let total = summary.total_claims;

        let summary_section = SummarySection {
            total_claims: total,
            conforming_claims: summary.conforming_claims,
            conforming_pct: percentage(summary.conforming_claims, total),
            at_risk_claims: summary.at_risk_claims,
            at_risk_pct: percentage(summary.at_risk_claims, total),
            non_conforming_claims: summary.non_conforming_claims,
            non_conforming_pct: percentage(summary.non_conforming_claims, total),
            global_score: summary.global_score,
            risk_level: summary.risk_level,
            summary_phrase: summary_phrase(summary.risk_level).to_string(),
        };

        let claim_sections = claims
            .iter()
            .enumerate()
            .map(|(i, analyzed)| {
                // Present rows in the fixed criterion order
                let mut rows = Vec::with_capacity(ALL_CRITERIA.len());
                for criterion in ALL_CRITERIA {
                    if let Some(r) =
                        analyzed.results.iter().find(|r| r.criterion == criterion)
                    {
                        rows.push(CriterionRow {
                            criterion_label: r.criterion.label().to_string(),
                            verdict_label: r.verdict.label().to_string(),
                            explanation: r.explanation.clone(),
                            recommendation: r.recommendation.clone(),
                            regulation_reference: r.regulation_reference.clone(),
                        });
                    }
                }
                ClaimSection {
                    index: i + 1,
                    claim_text: analyzed.claim.claim_text.clone(),
                    support_label: analyzed.claim.support_type.label().to_string(),
                    scope_label: analyzed.claim.scope.label().to_string(),
                    verdict_label: analyzed.overall.label().to_string(),
                    rows,
                }
            })
            .collect();

        let correction_plan = build_correction_plan(claims);
        let labels_checklist = build_labels_checklist(claims);

        AuditReport {
            audit_id: summary.audit_id,
            company_name: summary.company_name.clone(),
            sector: summary.sector.clone(),
            completed_at: summary.completed_at,
            summary: summary_section,
            claims: claim_sections,
            correction_plan,
            labels_checklist,
            references: regulation_references(),
        }
    }
}

/// Corrective actions from non-conforming and at-risk results,
/// critical priority first.
fn build_correction_plan(claims: &[AnalyzedClaim]) -> Vec<CorrectionAction> {
    let mut actions = Vec::new();
    for analyzed in claims {
        if analyzed.overall == Verdict::Conforme {
            continue;
        }
        for r in &analyzed.results {
            if matches!(r.verdict, Verdict::NonConforme | Verdict::Risque) {
                if let Some(recommendation) = &r.recommendation {
                    let priority = if r.verdict == Verdict::NonConforme {
                        "Critique"
                    } else {
                        "Élevé"
                    };
                    actions.push(CorrectionAction {
                        priority: priority.to_string(),
                        claim_excerpt: excerpt(&analyzed.claim.claim_text, 60),
                        criterion_label: r.criterion.label().to_string(),
                        action: recommendation.clone(),
                    });
                }
            }
        }
    }
    // Stable sort keeps claim order within each priority band
    actions.sort_by_key(|a| if a.priority == "Critique" { 0 } else { 1 });
    actions
}

fn build_labels_checklist(claims: &[AnalyzedClaim]) -> LabelsChecklist {
    let mut checklist = LabelsChecklist::default();
    for analyzed in claims {
        if !analyzed.claim.has_label {
            continue;
        }
        let name = analyzed
            .claim
            .label_name
            .clone()
            .unwrap_or_else(|| "Label non précisé".to_string());
        if analyzed.claim.label_is_certified == Some(true) {
            checklist.to_keep.push(name);
        } else {
            checklist.to_remove.push(name);
        }
    }
    checklist
}

/// Render a report in the requested format.
pub fn generate_report(report: &AuditReport, format: ReportFormat) -> CoreResult<String> {
    match format {
        ReportFormat::Json => json::generate(report),
        ReportFormat::Markdown => Ok(markdown::generate(report)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyze_claim, Claim, ClaimScope};

    fn analyzed(text: &str, scope: ClaimScope) -> AnalyzedClaim {
        let claim = Claim {
            claim_text: text.to_string(),
            scope,
            ..Claim::default()
        };
        let analysis = analyze_claim(&claim);
        AnalyzedClaim {
            claim,
            overall: analysis.overall,
            results: analysis.results.to_vec(),
        }
    }

    fn summary_for(claims: &[AnalyzedClaim]) -> AuditSummary {
        let counts = crate::compute_verdict_counts(
            claims.iter().map(|c| c.overall.as_str()),
        );
        let (score, risk_level) = crate::calculate_global_score(
            counts.conforme,
            counts.risque,
            counts.non_conforme,
        );
        AuditSummary {
            audit_id: Uuid::new_v4(),
            company_name: "Acme".to_string(),
            sector: "cosmetiques".to_string(),
            total_claims: counts.total(),
            conforming_claims: counts.conforme,
            at_risk_claims: counts.risque,
            non_conforming_claims: counts.non_conforme,
            global_score: score,
            risk_level,
            completed_at: None,
        }
    }

    #[test]
    fn test_report_sections() {
        let claims = vec![
            analyzed("Notre produit est écologique", ClaimScope::Produit),
            analyzed(
                "Nos emballages contiennent 30% de carton recyclé",
                ClaimScope::Produit,
            ),
        ];
        let summary = summary_for(&claims);
        let report = AuditReport::build(&summary, &claims);

        assert_eq!(report.claims.len(), 2);
        assert_eq!(report.claims[0].rows.len(), 6);
        assert_eq!(report.claims[0].index, 1);
        assert_eq!(report.references.len(), 4);
        assert!(!report.summary.summary_phrase.is_empty());
    }

    #[test]
    fn test_correction_plan_priorities() {
        let claims = vec![analyzed("Notre produit est écologique", ClaimScope::Produit)];
        let summary = summary_for(&claims);
        let report = AuditReport::build(&summary, &claims);

        assert!(!report.correction_plan.is_empty());
        // Critical actions sort before elevated ones
        let first_elevated = report
            .correction_plan
            .iter()
            .position(|a| a.priority == "Élevé");
        let last_critical = report
            .correction_plan
            .iter()
            .rposition(|a| a.priority == "Critique");
        if let (Some(e), Some(c)) = (first_elevated, last_critical) {
            assert!(c < e);
        }
    }

    #[test]
    fn test_conforming_claim_contributes_no_actions() {
        let claim = Claim {
            claim_text: "Nos emballages contiennent 30% de carton recyclé".to_string(),
            has_proof: true,
            proof_type: Some(crate::ProofType::CertificationTierce),
            ..Claim::default()
        };
        let analysis = analyze_claim(&claim);
        let analyzed = AnalyzedClaim {
            claim,
            overall: analysis.overall,
            results: analysis.results.to_vec(),
        };
        assert_eq!(analyzed.overall, Verdict::Conforme);
        let summary = summary_for(std::slice::from_ref(&analyzed));
        let report = AuditReport::build(&summary, &[analyzed]);
        assert!(report.correction_plan.is_empty());
    }

    #[test]
    fn test_labels_checklist_split() {
        let mut certified = Claim {
            claim_text: "Produit porteur du label".to_string(),
            has_label: true,
            label_name: Some("EU Ecolabel".to_string()),
            label_is_certified: Some(true),
            ..Claim::default()
        };
        certified.has_proof = true;
        certified.proof_type = Some(crate::ProofType::CertificationTierce);
        let self_awarded = Claim {
            claim_text: "Produit maison".to_string(),
            has_label: true,
            label_name: Some("Green Company".to_string()),
            label_is_certified: Some(false),
            ..Claim::default()
        };

        let claims: Vec<AnalyzedClaim> = [certified, self_awarded]
            .into_iter()
            .map(|claim| {
                let analysis = analyze_claim(&claim);
                AnalyzedClaim {
                    claim,
                    overall: analysis.overall,
                    results: analysis.results.to_vec(),
                }
            })
            .collect();

        let summary = summary_for(&claims);
        let report = AuditReport::build(&summary, &claims);
        assert_eq!(report.labels_checklist.to_keep, vec!["EU Ecolabel"]);
        assert_eq!(report.labels_checklist.to_remove, vec!["Green Company"]);
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let text = "é".repeat(80);
        let e = excerpt(&text, 60);
        assert_eq!(e.chars().count(), 61); // 60 chars + ellipsis
    }
}

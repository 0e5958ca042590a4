//! GreenAudit Core Analysis Engine
//!
//! This crate provides the core compliance engine for analyzing
//! environmental claims against the six EmpCo (EU 2024/825) criteria,
//! aggregating per-criterion verdicts and scoring whole audits.

pub mod aggregate;
pub mod claim;
pub mod lexicon;
pub mod report;
pub mod rules;
pub mod scoring;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use aggregate::overall_verdict;
pub use claim::{Claim, ClaimScope, CriterionResult, ProofType, SupportType};
pub use scoring::{calculate_global_score, compute_verdict_counts, VerdictCounts};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Report error: {0}")]
    Report(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Verdict assigned per criterion and overall per claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Conforme,
    NonConforme,
    Risque,
    NonApplicable,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Conforme => "conforme",
            Verdict::NonConforme => "non_conforme",
            Verdict::Risque => "risque",
            Verdict::NonApplicable => "non_applicable",
        }
    }

    /// Parse a stored verdict string; unknown values yield None.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "conforme" => Some(Verdict::Conforme),
            "non_conforme" => Some(Verdict::NonConforme),
            "risque" => Some(Verdict::Risque),
            "non_applicable" => Some(Verdict::NonApplicable),
            _ => None,
        }
    }

    /// French label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Conforme => "Conforme",
            Verdict::NonConforme => "Non conforme",
            Verdict::Risque => "Risque",
            Verdict::NonApplicable => "N/A",
        }
    }

    pub fn is_conforme(&self) -> bool {
        matches!(self, Verdict::Conforme)
    }

    pub fn is_non_conforme(&self) -> bool {
        matches!(self, Verdict::NonConforme)
    }

    pub fn is_risque(&self) -> bool {
        matches!(self, Verdict::Risque)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six fixed EmpCo compliance criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Specificity,
    Compensation,
    Labels,
    Proportionality,
    FutureCommitment,
    Justification,
}

impl Criterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Specificity => "specificity",
            Criterion::Compensation => "compensation",
            Criterion::Labels => "labels",
            Criterion::Proportionality => "proportionality",
            Criterion::FutureCommitment => "future_commitment",
            Criterion::Justification => "justification",
        }
    }

    /// Parse a stored criterion string; unknown values yield None.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "specificity" => Some(Criterion::Specificity),
            "compensation" => Some(Criterion::Compensation),
            "labels" => Some(Criterion::Labels),
            "proportionality" => Some(Criterion::Proportionality),
            "future_commitment" => Some(Criterion::FutureCommitment),
            "justification" => Some(Criterion::Justification),
            _ => None,
        }
    }

    /// French label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Specificity => "Spécificité",
            Criterion::Compensation => "Neutralité carbone",
            Criterion::Labels => "Labels",
            Criterion::Proportionality => "Proportionnalité",
            Criterion::FutureCommitment => "Engagements futurs",
            Criterion::Justification => "Justification / Preuves",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation and presentation order of the six criteria
pub const ALL_CRITERIA: [Criterion; 6] = [
    Criterion::Specificity,
    Criterion::Compensation,
    Criterion::Labels,
    Criterion::Proportionality,
    Criterion::FutureCommitment,
    Criterion::Justification,
];

/// Audit-wide risk band derived from the global score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Faible,
    Modere,
    Eleve,
    Critique,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Faible => "faible",
            RiskLevel::Modere => "modere",
            RiskLevel::Eleve => "eleve",
            RiskLevel::Critique => "critique",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "faible" => Some(RiskLevel::Faible),
            "modere" => Some(RiskLevel::Modere),
            "eleve" => Some(RiskLevel::Eleve),
            "critique" => Some(RiskLevel::Critique),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a full claim analysis: the six criterion results in
/// `ALL_CRITERIA` order plus the aggregated overall verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimAnalysis {
    pub results: [CriterionResult; 6],
    pub overall: Verdict,
}

/// Run the six rules on a claim and aggregate the overall verdict.
///
/// Total over its input domain: every branch of every rule is defined,
/// so this never fails. Re-running on an unchanged claim produces an
/// identical analysis.
pub fn analyze_claim(claim: &Claim) -> ClaimAnalysis {
    let results = ALL_CRITERIA.map(|criterion| rules::evaluate(criterion, claim));
    let overall = aggregate::overall_verdict(&results);
    ClaimAnalysis { results, overall }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_verdict_roundtrip() {
        for v in [
            Verdict::Conforme,
            Verdict::NonConforme,
            Verdict::Risque,
            Verdict::NonApplicable,
        ] {
            assert_eq!(Verdict::parse(v.as_str()), Some(v));
        }
        assert_eq!(Verdict::parse("unknown"), None);
    }

    #[test]
    fn test_always_six_results_no_duplicates() {
        let claim = Claim {
            claim_text: "Test quelconque".to_string(),
            ..Claim::default()
        };
        let analysis = analyze_claim(&claim);
        assert_eq!(analysis.results.len(), 6);
        let criteria: HashSet<Criterion> =
            analysis.results.iter().map(|r| r.criterion).collect();
        assert_eq!(criteria.len(), 6);
    }

    #[test]
    fn test_bare_claim_gated_criteria_not_applicable() {
        // No blacklist/carbon term, no label, no future commitment:
        // every gated criterion is not applicable
        let claim = Claim {
            claim_text: "Texte sans rapport".to_string(),
            ..Claim::default()
        };
        let analysis = analyze_claim(&claim);
        for result in &analysis.results {
            match result.criterion {
                Criterion::Justification => {
                    assert_eq!(result.verdict, Verdict::NonConforme)
                }
                _ => assert_eq!(result.verdict, Verdict::NonApplicable),
            }
        }
    }

    #[test]
    fn test_results_follow_fixed_order() {
        let claim = Claim::default();
        let analysis = analyze_claim(&claim);
        for (result, criterion) in analysis.results.iter().zip(ALL_CRITERIA) {
            assert_eq!(result.criterion, criterion);
        }
    }

    #[test]
    fn test_reanalysis_is_idempotent() {
        let claim = Claim {
            claim_text: "Produit durable certifié ISO 14001".to_string(),
            scope: ClaimScope::Entreprise,
            has_proof: true,
            proof_type: Some(ProofType::RapportInterne),
            ..Claim::default()
        };
        let first = analyze_claim(&claim);
        let second = analyze_claim(&claim);
        assert_eq!(first.overall, second.overall);
        for (a, b) in first.results.iter().zip(second.results.iter()) {
            assert_eq!(a.criterion, b.criterion);
            assert_eq!(a.verdict, b.verdict);
            assert_eq!(a.explanation, b.explanation);
            assert_eq!(a.recommendation, b.recommendation);
        }
    }

    #[test]
    fn test_fully_compliant_claim() {
        let claim = Claim {
            claim_text: "Nos emballages contiennent 80% de carton recyclé post-consommation"
                .to_string(),
            scope: ClaimScope::Produit,
            has_proof: true,
            proof_type: Some(ProofType::CertificationTierce),
            ..Claim::default()
        };
        let analysis = analyze_claim(&claim);
        assert_eq!(analysis.overall, Verdict::Conforme);
    }

    #[test]
    fn test_generic_claim_without_proof() {
        let claim = Claim {
            claim_text: "Produit naturel".to_string(),
            ..Claim::default()
        };
        let analysis = analyze_claim(&claim);
        assert_eq!(analysis.overall, Verdict::NonConforme);
        let nc: Vec<Criterion> = analysis
            .results
            .iter()
            .filter(|r| r.verdict == Verdict::NonConforme)
            .map(|r| r.criterion)
            .collect();
        assert!(nc.contains(&Criterion::Specificity));
        assert!(nc.contains(&Criterion::Justification));
    }

    #[test]
    fn test_two_risks_no_non_conforme_is_risque() {
        let claim = Claim {
            claim_text: "Produit durable certifié ISO 14001".to_string(),
            scope: ClaimScope::Entreprise,
            has_proof: true,
            proof_type: Some(ProofType::RapportInterne),
            ..Claim::default()
        };
        let analysis = analyze_claim(&claim);
        let verdict_of = |c: Criterion| {
            analysis
                .results
                .iter()
                .find(|r| r.criterion == c)
                .map(|r| r.verdict)
                .unwrap()
        };
        assert_eq!(verdict_of(Criterion::Specificity), Verdict::Risque);
        assert_eq!(verdict_of(Criterion::Justification), Verdict::Risque);
        assert_eq!(verdict_of(Criterion::Proportionality), Verdict::Conforme);
        assert_eq!(verdict_of(Criterion::Compensation), Verdict::NonApplicable);
        assert_eq!(verdict_of(Criterion::Labels), Verdict::NonApplicable);
        assert_eq!(
            verdict_of(Criterion::FutureCommitment),
            Verdict::NonApplicable
        );
        assert_eq!(analysis.overall, Verdict::Risque);
    }

    #[test]
    fn test_carbon_neutral_overrides_strong_proof() {
        let claim = Claim {
            claim_text: "Entreprise neutre en carbone grâce à nos efforts".to_string(),
            has_proof: true,
            proof_type: Some(ProofType::CertificationTierce),
            ..Claim::default()
        };
        let analysis = analyze_claim(&claim);
        assert_eq!(analysis.overall, Verdict::NonConforme);
        let compensation = analysis
            .results
            .iter()
            .find(|r| r.criterion == Criterion::Compensation)
            .unwrap();
        assert_eq!(compensation.verdict, Verdict::NonConforme);
    }

    #[test]
    fn test_ecological_product_scenario() {
        let claim = Claim {
            claim_text: "Notre produit est écologique".to_string(),
            scope: ClaimScope::Produit,
            ..Claim::default()
        };
        let analysis = analyze_claim(&claim);
        let verdict_of = |c: Criterion| {
            analysis
                .results
                .iter()
                .find(|r| r.criterion == c)
                .map(|r| r.verdict)
                .unwrap()
        };
        assert_eq!(verdict_of(Criterion::Specificity), Verdict::NonConforme);
        assert_eq!(verdict_of(Criterion::Compensation), Verdict::NonApplicable);
        assert_eq!(verdict_of(Criterion::Labels), Verdict::NonApplicable);
        assert_eq!(
            verdict_of(Criterion::Proportionality),
            Verdict::NonApplicable
        );
        assert_eq!(
            verdict_of(Criterion::FutureCommitment),
            Verdict::NonApplicable
        );
        assert_eq!(verdict_of(Criterion::Justification), Verdict::NonConforme);
        assert_eq!(analysis.overall, Verdict::NonConforme);
    }
}

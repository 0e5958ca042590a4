//! Labels rule — self-awarded sustainability labels

use crate::claim::{Claim, CriterionResult};
use crate::{Criterion, Verdict};

/// Check declared labels: only third-party-certified labels conform.
///
/// An uncertified label (certified flag false or unknown) counts as
/// self-awarded.
pub fn evaluate(claim: &Claim) -> CriterionResult {
    if !claim.has_label {
        return CriterionResult {
            criterion: Criterion::Labels,
            verdict: Verdict::NonApplicable,
            explanation: "Aucun label déclaré pour cette allégation.".to_string(),
            recommendation: None,
            regulation_reference: None,
        };
    }

    let label_name = claim.label_name.as_deref().unwrap_or("non précisé");

    if claim.label_is_certified == Some(true) {
        return CriterionResult {
            criterion: Criterion::Labels,
            verdict: Verdict::Conforme,
            explanation: format!(
                "Le label « {} » est certifié par un organisme tiers indépendant.",
                label_name
            ),
            recommendation: None,
            regulation_reference: None,
        };
    }

    CriterionResult {
        criterion: Criterion::Labels,
        verdict: Verdict::NonConforme,
        explanation: format!(
            "Le label « {} » est auto-décerné. Les labels de durabilité \
             auto-décernés sont interdits par la directive EmpCo.",
            label_name
        ),
        recommendation: Some(
            "Retirer ce label ou obtenir une certification par un organisme \
             tiers indépendant accrédité."
                .to_string(),
        ),
        regulation_reference: Some(
            "Directive EmpCo (EU 2024/825), Art. 2(r) — labels de durabilité \
             certifiés par des tiers"
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_label() {
        let claim = Claim::default();
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonApplicable);
    }

    #[test]
    fn test_certified_label() {
        let claim = Claim {
            has_label: true,
            label_name: Some("EU Ecolabel".to_string()),
            label_is_certified: Some(true),
            ..Claim::default()
        };
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::Conforme);
        assert!(result.explanation.contains("EU Ecolabel"));
    }

    #[test]
    fn test_self_awarded_label() {
        let claim = Claim {
            has_label: true,
            label_name: Some("Green Company".to_string()),
            label_is_certified: Some(false),
            ..Claim::default()
        };
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonConforme);
        assert!(result.explanation.contains("auto-décerné"));
    }

    #[test]
    fn test_unknown_certification_counts_as_self_awarded() {
        let claim = Claim {
            has_label: true,
            label_name: None,
            label_is_certified: None,
            ..Claim::default()
        };
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonConforme);
        assert!(result.explanation.contains("non précisé"));
    }
}

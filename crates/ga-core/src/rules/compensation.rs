//! Compensation rule — carbon neutrality claims

use crate::claim::{Claim, CriterionResult};
use crate::lexicon;
use crate::{Criterion, Verdict};

/// Detect carbon-neutrality claims, banned absolutely by EmpCo.
///
/// No qualification or proof can cure a match: any carbon-neutral
/// phrase is non-conforming.
pub fn evaluate(claim: &Claim) -> CriterionResult {
    let text = lexicon::normalize(&claim.claim_text);

    let matched_term = match lexicon::find_carbon_neutral_term(&text) {
        Some(term) => term,
        None => {
            return CriterionResult {
                criterion: Criterion::Compensation,
                verdict: Verdict::NonApplicable,
                explanation: "Aucune allégation de neutralité carbone détectée.".to_string(),
                recommendation: None,
                regulation_reference: None,
            };
        }
    };

    CriterionResult {
        criterion: Criterion::Compensation,
        verdict: Verdict::NonConforme,
        explanation: format!(
            "L'allégation contient « {} ». Les claims de neutralité carbone \
             basées sur la compensation sont interdites par la directive EmpCo, \
             sans exception.",
            matched_term
        ),
        recommendation: Some(
            "Supprimer toute référence à la neutralité carbone. \
             Communiquer plutôt sur les réductions d'émissions concrètes \
             et mesurables de l'entreprise."
                .to_string(),
        ),
        regulation_reference: Some(
            "Directive EmpCo (EU 2024/825), Art. 2(o) et Annexe I, point 4 — interdiction \
             des allégations de neutralité carbone par compensation"
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim_with_text(text: &str) -> Claim {
        Claim {
            claim_text: text.to_string(),
            ..Claim::default()
        }
    }

    #[test]
    fn test_no_carbon_neutral_term() {
        let claim = claim_with_text("Nous réduisons nos émissions de 20%");
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonApplicable);
    }

    #[test]
    fn test_carbon_neutral() {
        let claim = claim_with_text("Notre entreprise est carbon neutral depuis 2024");
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonConforme);
    }

    #[test]
    fn test_neutre_en_carbone() {
        let claim = claim_with_text("Livraison neutre en carbone");
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonConforme);
        assert!(result.explanation.contains("neutre en carbone"));
    }

    #[test]
    fn test_net_zero() {
        let claim = claim_with_text("Objectif net zero atteint");
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonConforme);
    }

    #[test]
    fn test_compensation_carbone() {
        let claim = claim_with_text("Émissions en compensation carbone via reforestation");
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonConforme);
    }
}

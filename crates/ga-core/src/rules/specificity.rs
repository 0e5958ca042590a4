//! Specificity rule — generic claims against the blacklist

use crate::claim::{Claim, CriterionResult};
use crate::lexicon;
use crate::{Criterion, Verdict};

/// Detect generic terms banned by EmpCo in the claim text.
///
/// No blacklisted term → not applicable. A term with a measurable
/// qualification is a risk (the proof may still be insufficient); a
/// bare term is non-conforming.
pub fn evaluate(claim: &Claim) -> CriterionResult {
    let text = lexicon::normalize(&claim.claim_text);

    let matched_term = match lexicon::find_blacklist_term(&text) {
        Some(term) => term,
        None => {
            return CriterionResult {
                criterion: Criterion::Specificity,
                verdict: Verdict::NonApplicable,
                explanation: "Aucun terme générique interdit détecté dans l'allégation."
                    .to_string(),
                recommendation: None,
                regulation_reference: None,
            };
        }
    };

    if lexicon::has_qualification(&text) {
        return CriterionResult {
            criterion: Criterion::Specificity,
            verdict: Verdict::Risque,
            explanation: format!(
                "Le terme « {} » est présent mais accompagné d'une qualification. \
                 Vérifier que la preuve est suffisante et mesurable.",
                matched_term
            ),
            recommendation: Some(
                "Fournir une preuve quantifiée et vérifiable pour étayer \
                 la qualification du terme générique."
                    .to_string(),
            ),
            regulation_reference: Some(
                "Directive EmpCo (EU 2024/825), Art. 2(o) — interdiction des allégations \
                 environnementales génériques sans preuve"
                    .to_string(),
            ),
        };
    }

    CriterionResult {
        criterion: Criterion::Specificity,
        verdict: Verdict::NonConforme,
        explanation: format!(
            "Le terme « {} » est utilisé seul, sans qualification spécifique \
             ni preuve mesurable. Ceci est interdit par la directive EmpCo.",
            matched_term
        ),
        recommendation: Some(format!(
            "Supprimer le terme « {} » ou le remplacer par une allégation \
             spécifique et mesurable (ex : « contient 30% de matières recyclées »).",
            matched_term
        )),
        regulation_reference: Some(
            "Directive EmpCo (EU 2024/825), Art. 2(o) — interdiction des allégations \
             environnementales génériques"
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
    fn test_no_blacklist_term() {
        let claim = claim_with_text("Nos emballages contiennent 30% de carton recyclé");
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonApplicable);
        assert!(result.recommendation.is_none());
    }

    #[test]
    fn test_blacklist_term_alone() {
        let claim = claim_with_text("Notre produit est écologique");
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonConforme);
        assert!(result.explanation.contains("écologique"));
        assert!(result.recommendation.is_some());
        assert!(result.regulation_reference.is_some());
    }

    #[test]
    fn test_blacklist_term_with_qualification() {
        let claim =
            claim_with_text("Produit écologique : 30% de matières recyclées certifiées ISO 14001");
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::Risque);
    }

    #[test]
    fn test_green_alone() {
        let claim = claim_with_text("Un produit green pour la planète");
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonConforme);
    }

    #[test]
    fn test_sustainable_with_percentage() {
        let claim = claim_with_text("Sustainable : réduction de 40% de nos émissions");
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::Risque);
    }
}

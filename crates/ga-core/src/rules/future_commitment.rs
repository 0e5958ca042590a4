//! Future commitment rule — target date and independent verification

use crate::claim::{Claim, CriterionResult};
use crate::{Criterion, Verdict};

/// Check future environmental commitments: EmpCo requires both a
/// precise target date and independent verification of progress.
///
/// The non-conforming explanation enumerates exactly which of the two
/// companions is missing, "date cible" before "vérification
/// indépendante", joined with " et " when both are absent.
pub fn evaluate(claim: &Claim) -> CriterionResult {
    if !claim.is_future_commitment {
        return CriterionResult {
            criterion: Criterion::FutureCommitment,
            verdict: Verdict::NonApplicable,
            explanation: "L'allégation n'est pas un engagement futur.".to_string(),
            recommendation: None,
            regulation_reference: None,
        };
    }

    let has_date = claim.target_date.is_some();
    let has_verif = claim.has_independent_verification;

    if let (Some(target_date), true) = (claim.target_date, has_verif) {
        return CriterionResult {
            criterion: Criterion::FutureCommitment,
            verdict: Verdict::Conforme,
            explanation: format!(
                "L'engagement futur dispose d'une date cible ({}) et d'un suivi \
                 par un vérificateur indépendant.",
                target_date
            ),
            recommendation: None,
            regulation_reference: None,
        };
    }

    let mut missing = Vec::new();
    if !has_date {
        missing.push("date cible");
    }
    if !has_verif {
        missing.push("vérification indépendante");
    }

    CriterionResult {
        criterion: Criterion::FutureCommitment,
        verdict: Verdict::NonConforme,
        explanation: format!(
            "L'engagement futur est incomplet : il manque {}. \
             EmpCo exige un calendrier précis et un suivi indépendant.",
            missing.join(" et ")
        ),
        recommendation: Some(
            "Définir une date cible précise et mandater un organisme indépendant \
             pour suivre et vérifier la réalisation de l'engagement."
                .to_string(),
        ),
        regulation_reference: Some(
            "Directive EmpCo (EU 2024/825), Annexe I, point 5 — engagements \
             environnementaux futurs"
                .to_string(),
        ),
    }
}

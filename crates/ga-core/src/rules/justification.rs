//! Justification rule — proof presence and quality

use crate::claim::{Claim, CriterionResult, ProofType};
use crate::{Criterion, Verdict};

/// Check the declared proof backing the claim.
///
/// Third-party certifications and traceable supplier data conform; an
/// internal report is a risk; an unrecognized or unspecified proof
/// type falls back to risk rather than failing the claim outright.
pub fn evaluate(claim: &Claim) -> CriterionResult {
    if !claim.has_proof || claim.proof_type == Some(ProofType::Aucune) {
        return CriterionResult {
            criterion: Criterion::Justification,
            verdict: Verdict::NonConforme,
            explanation: "Aucune preuve fournie pour étayer cette allégation. \
                 Toute allégation environnementale doit être justifiée."
                .to_string(),
            recommendation: Some(
                "Fournir une preuve vérifiable : certification tierce, \
                 données fournisseur traçables ou rapport d'audit indépendant."
                    .to_string(),
            ),
            regulation_reference: Some(
                "Directive EmpCo (EU 2024/825), Art. 3 — obligation de justification \
                 des allégations"
                    .to_string(),
            ),
        };
    }

    match &claim.proof_type {
        Some(proof @ (ProofType::CertificationTierce | ProofType::DonneesFournisseur)) => {
            CriterionResult {
                criterion: Criterion::Justification,
                verdict: Verdict::Conforme,
                explanation: format!(
                    "L'allégation est étayée par une preuve de type « {} ». \
                     Ce niveau de justification est acceptable.",
                    proof
                ),
                recommendation: None,
                regulation_reference: None,
            }
        }
        Some(ProofType::RapportInterne) => CriterionResult {
            criterion: Criterion::Justification,
            verdict: Verdict::Risque,
            explanation: "L'allégation est étayée par un rapport interne. \
                 Cette preuve est considérée comme faible car non vérifiée \
                 par un tiers indépendant."
                .to_string(),
            recommendation: Some(
                "Faire valider le rapport interne par un organisme indépendant \
                 ou obtenir une certification tierce."
                    .to_string(),
            ),
            regulation_reference: Some(
                "Directive EmpCo (EU 2024/825), Art. 3 — preuves scientifiques reconnues"
                    .to_string(),
            ),
        },
        // Unrecognized or unspecified proof type: conservative fallback
        other => {
            let raw = other.as_ref().map(|p| p.as_str()).unwrap_or("non précisé");
            CriterionResult {
                criterion: Criterion::Justification,
                verdict: Verdict::Risque,
                explanation: format!(
                    "Le type de preuve « {} » n'est pas dans les catégories \
                     reconnues. Vérifier sa recevabilité.",
                    raw
                ),
                recommendation: Some(
                    "Fournir une certification tierce ou des données fournisseur traçables."
                        .to_string(),
                ),
                regulation_reference: Some(
                    "Directive EmpCo (EU 2024/825), Art. 3".to_string(),
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim_with_proof(proof_type: Option<ProofType>) -> Claim {
        Claim {
            has_proof: true,
            proof_type,
            ..Claim::default()
        }
    }

    #[test]
    fn test_no_proof() {
        let claim = Claim::default();
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonConforme);
    }

    #[test]
    fn test_proof_type_aucune() {
        let result = evaluate(&claim_with_proof(Some(ProofType::Aucune)));
        assert_eq!(result.verdict, Verdict::NonConforme);
    }

    #[test]
    fn test_certification_tierce() {
        let result = evaluate(&claim_with_proof(Some(ProofType::CertificationTierce)));
        assert_eq!(result.verdict, Verdict::Conforme);
    }

    #[test]
    fn test_donnees_fournisseur() {
        let result = evaluate(&claim_with_proof(Some(ProofType::DonneesFournisseur)));
        assert_eq!(result.verdict, Verdict::Conforme);
    }

    #[test]
    fn test_rapport_interne() {
        let result = evaluate(&claim_with_proof(Some(ProofType::RapportInterne)));
        assert_eq!(result.verdict, Verdict::Risque);
    }

    #[test]
    fn test_unknown_proof_type() {
        let result = evaluate(&claim_with_proof(Some(ProofType::Autre(
            "autre_chose".to_string(),
        ))));
        assert_eq!(result.verdict, Verdict::Risque);
        assert!(result.explanation.contains("autre_chose"));
    }

    #[test]
    fn test_unspecified_proof_type_with_proof() {
        let result = evaluate(&claim_with_proof(None));
        assert_eq!(result.verdict, Verdict::Risque);
        assert!(result.explanation.contains("non précisé"));
    }
}

//! Proportionality rule — company-wide scope vs partial aspect

use crate::claim::{Claim, ClaimScope, CriterionResult};
use crate::lexicon;
use crate::{Criterion, Verdict};

/// Check that a company-wide claim is not internally limited to a
/// single operational aspect (packaging, transport, one product…).
pub fn evaluate(claim: &Claim) -> CriterionResult {
    if claim.scope != ClaimScope::Entreprise {
        return CriterionResult {
            criterion: Criterion::Proportionality,
            verdict: Verdict::NonApplicable,
            explanation:
                "Le scope est limité à un produit, la règle de proportionnalité ne s'applique pas."
                    .to_string(),
            recommendation: None,
            regulation_reference: None,
        };
    }

    let text = lexicon::normalize(&claim.claim_text);

    if lexicon::has_partial_scope_mention(&text) {
        return CriterionResult {
            criterion: Criterion::Proportionality,
            verdict: Verdict::Risque,
            explanation: "L'allégation est déclarée au niveau « entreprise » mais le texte \
                 mentionne un aspect partiel (emballage, transport, produit…). \
                 Cela peut induire le consommateur en erreur sur la portée réelle."
                .to_string(),
            recommendation: Some(
                "Reformuler l'allégation pour préciser qu'elle ne concerne qu'un \
                 aspect spécifique de l'activité, ou fournir des preuves couvrant \
                 l'ensemble de l'entreprise."
                    .to_string(),
            ),
            regulation_reference: Some(
                "Directive EmpCo (EU 2024/825), Art. 2(o) — proportionnalité et clarté \
                 des allégations"
                    .to_string(),
            ),
        };
    }

    CriterionResult {
        criterion: Criterion::Proportionality,
        verdict: Verdict::Conforme,
        explanation: "L'allégation au niveau « entreprise » ne semble pas limitée à un \
             aspect partiel. La portée déclarée paraît cohérente avec le contenu."
            .to_string(),
        recommendation: None,
        regulation_reference: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_produit() {
        let claim = Claim {
            claim_text: "Emballage recyclable".to_string(),
            scope: ClaimScope::Produit,
            ..Claim::default()
        };
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::NonApplicable);
    }

    #[test]
    fn test_scope_entreprise_no_partial() {
        let claim = Claim {
            claim_text: "Nous sommes engagés dans une démarche globale".to_string(),
            scope: ClaimScope::Entreprise,
            ..Claim::default()
        };
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::Conforme);
    }

    #[test]
    fn test_scope_entreprise_mentions_emballage() {
        let claim = Claim {
            claim_text: "Notre entreprise utilise uniquement des emballages recyclés".to_string(),
            scope: ClaimScope::Entreprise,
            ..Claim::default()
        };
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::Risque);
    }

    #[test]
    fn test_scope_entreprise_mentions_transport() {
        let claim = Claim {
            claim_text: "Nous avons réduit l'impact de notre transport".to_string(),
            scope: ClaimScope::Entreprise,
            ..Claim::default()
        };
        let result = evaluate(&claim);
        assert_eq!(result.verdict, Verdict::Risque);
    }
}

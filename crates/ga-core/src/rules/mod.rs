//! Compliance rule evaluators
//!
//! One module per EmpCo criterion:
//! - Specificity (generic-term blacklist)
//! - Compensation (carbon neutrality by offset)
//! - Labels (self-awarded sustainability labels)
//! - Proportionality (company-wide scope vs partial aspect)
//! - Future commitment (target date + independent verification)
//! - Justification (proof presence and quality)

pub mod compensation;
pub mod future_commitment;
pub mod justification;
pub mod labels;
pub mod proportionality;
pub mod specificity;

use crate::claim::{Claim, CriterionResult};
use crate::Criterion;

/// Evaluate a single criterion against a claim.
///
/// The criterion set is closed, so dispatch is a static match rather
/// than trait objects; every arm is a total function over the claim.
pub fn evaluate(criterion: Criterion, claim: &Claim) -> CriterionResult {
    match criterion {
        Criterion::Specificity => specificity::evaluate(claim),
        Criterion::Compensation => compensation::evaluate(claim),
        Criterion::Labels => labels::evaluate(claim),
        Criterion::Proportionality => proportionality::evaluate(claim),
        Criterion::FutureCommitment => future_commitment::evaluate(claim),
        Criterion::Justification => justification::evaluate(claim),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ALL_CRITERIA;

    #[test]
    fn test_every_criterion_reports_itself() {
        let claim = Claim::default();
        for criterion in ALL_CRITERIA {
            let result = evaluate(criterion, &claim);
            assert_eq!(result.criterion, criterion);
            assert!(!result.explanation.is_empty());
        }
    }
}

//! Overall verdict aggregation across the six criterion results

use crate::claim::CriterionResult;
use crate::Verdict;

/// Derive the overall claim verdict from its criterion results.
///
/// Precedence:
/// 1. any non-conforming criterion → non-conforming
/// 2. else two or more risk criteria → risk
/// 3. else conforming
///
/// Not-applicable results never influence the outcome, and the result
/// does not depend on evaluation order.
pub fn overall_verdict(results: &[CriterionResult]) -> Verdict {
    let non_conforme_count = results
        .iter()
        .filter(|r| r.verdict == Verdict::NonConforme)
        .count();
    let risque_count = results
        .iter()
        .filter(|r| r.verdict == Verdict::Risque)
        .count();

    if non_conforme_count > 0 {
        Verdict::NonConforme
    } else if risque_count >= 2 {
        Verdict::Risque
    } else {
        Verdict::Conforme
    }
}

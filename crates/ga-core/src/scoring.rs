//! Audit-level scoring
//!
//! Score = (conforming * 100 + at-risk * 50) / total, rounded half-up
//! to two decimal places.

use crate::RiskLevel;
use serde::{Deserialize, Serialize};

/// Tally of overall claim verdicts across one audit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    pub conforme: u32,
    pub risque: u32,
    pub non_conforme: u32,
}

impl VerdictCounts {
    pub fn total(&self) -> u32 {
        self.conforme + self.risque + self.non_conforme
    }
}

/// Count overall verdicts from their stored string form.
///
/// Unknown verdict values are silently dropped from the tally.
pub fn compute_verdict_counts<'a, I>(verdicts: I) -> VerdictCounts
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = VerdictCounts::default();
    for verdict in verdicts {
        match verdict {
            "conforme" => counts.conforme += 1,
            "risque" => counts.risque += 1,
            "non_conforme" => counts.non_conforme += 1,
            _ => {}
        }
    }
    counts
}

/// Compute the global score (0–100, two decimals) and risk level.
///
/// An audit with zero claims scores 0.00 at critical risk: no claims
/// means nothing proven. Rounding is half-up on exact integer
/// arithmetic, so boundary scores land exactly on their band edge.
pub fn calculate_global_score(
    conforming: u32,
    at_risk: u32,
    non_conforming: u32,
) -> (f64, RiskLevel) {
    let total = conforming as u64 + at_risk as u64 + non_conforming as u64;
    if total == 0 {
        return (0.0, RiskLevel::Critique);
    }

    // Score in hundredths of a point, rounded half-up
    let numerator = (conforming as u64) * 10_000 + (at_risk as u64) * 5_000;
    let hundredths = (2 * numerator + total) / (2 * total);
    let score = hundredths as f64 / 100.0;

    let risk_level = if score >= 80.0 {
        RiskLevel::Faible
    } else if score >= 60.0 {
        RiskLevel::Modere
    } else if score >= 40.0 {
        RiskLevel::Eleve
    } else {
        RiskLevel::Critique
    };

    (score, risk_level)
}

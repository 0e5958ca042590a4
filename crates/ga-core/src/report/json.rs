//! JSON report rendering

use super::AuditReport;
use crate::CoreResult;

pub fn generate(report: &AuditReport) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

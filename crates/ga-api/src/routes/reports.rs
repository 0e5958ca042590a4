//! Report generation routes

use crate::auth::AuthPartner;
use crate::db::schema::{Audit, Claim, ClaimResult};
use crate::error::ApiError;
use crate::routes::audits::fetch_partner_audit;
use crate::AppState;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use ga_core::report::{AnalyzedClaim, AuditReport, AuditSummary, ReportFormat};
use ga_core::{Criterion, CriterionResult, RiskLevel, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>,
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub audit_id: Uuid,
    pub format: String,
    pub content: String,
}

fn parse_format(format: Option<&str>) -> ReportFormat {
    match format {
        Some("json") => ReportFormat::Json,
        _ => ReportFormat::Markdown,
    }
}

/// Rebuild the engine-level report input from persisted rows.
async fn build_report(db: &sqlx::PgPool, audit: &Audit) -> Result<AuditReport, ApiError> {
    let claims = sqlx::query_as::<_, Claim>(
        "SELECT * FROM claims WHERE audit_id = $1 ORDER BY created_at",
    )
    .bind(audit.id)
    .fetch_all(db)
    .await?;

    let results = sqlx::query_as::<_, ClaimResult>(
        "SELECT cr.* FROM claim_results cr \
         JOIN claims c ON c.id = cr.claim_id \
         WHERE c.audit_id = $1",
    )
    .bind(audit.id)
    .fetch_all(db)
    .await?;

    let mut by_claim: HashMap<Uuid, Vec<ClaimResult>> = HashMap::new();
    for result in results {
        by_claim.entry(result.claim_id).or_default().push(result);
    }

    let analyzed: Vec<AnalyzedClaim> = claims
        .into_iter()
        .map(|row| {
            let results = by_claim
                .remove(&row.id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|r| {
                    // Rows with unknown criterion or verdict strings are skipped
                    let criterion = Criterion::parse(&r.criterion)?;
                    let verdict = Verdict::parse(&r.verdict)?;
                    Some(CriterionResult {
                        criterion,
                        verdict,
                        explanation: r.explanation,
                        recommendation: r.recommendation,
                        regulation_reference: r.regulation_reference,
                    })
                })
                .collect();
            let overall = row
                .overall_verdict
                .as_deref()
                .and_then(Verdict::parse)
                .unwrap_or(Verdict::NonConforme);
            AnalyzedClaim {
                claim: row.to_engine(),
                overall,
                results,
            }
        })
        .collect();

    let summary = AuditSummary {
        audit_id: audit.id,
        company_name: audit.company_name.clone(),
        sector: audit.sector.clone(),
        total_claims: audit.total_claims.max(0) as u32,
        conforming_claims: audit.conforming_claims.max(0) as u32,
        at_risk_claims: audit.at_risk_claims.max(0) as u32,
        non_conforming_claims: audit.non_conforming_claims.max(0) as u32,
        global_score: audit.global_score.unwrap_or(0.0),
        risk_level: audit
            .risk_level
            .as_deref()
            .and_then(RiskLevel::parse)
            .unwrap_or(RiskLevel::Critique),
        completed_at: audit.completed_at,
    };

    Ok(AuditReport::build(&summary, &analyzed))
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, ApiError> {
    let audit = fetch_partner_audit(&state.db, id, partner.id).await?;

    if audit.status != "completed" {
        return Err(ApiError::BadRequest(
            "L'audit n'a pas encore été analysé".to_string(),
        ));
    }

    let format = parse_format(query.format.as_deref());
    let report = build_report(&state.db, &audit).await?;
    let content = ga_core::report::generate_report(&report, format)?;

    Ok(Json(ReportResponse {
        audit_id: id,
        format: match format {
            ReportFormat::Json => "json".to_string(),
            ReportFormat::Markdown => "markdown".to_string(),
        },
        content,
    }))
}

pub async fn download_report(
    State(state): State<Arc<AppState>>,
    auth: AuthPartner,
    Path(id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let format = query.format.clone();
    let report = get_report(State(state), auth, Path(id), Query(query)).await?.0;

    let (content_type, extension) = match format.as_deref() {
        Some("json") => ("application/json", "json"),
        _ => ("text/markdown", "md"),
    };

    let filename = format!("greenaudit_{}.{}", id, extension);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(report.content))
        .map_err(|e| ApiError::Internal(format!("Réponse invalide : {}", e)))
}

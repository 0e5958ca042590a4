//! Audit management routes

use crate::auth::AuthPartner;
use crate::db::schema::{Audit, Claim, ClaimResult};
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct CreateAuditRequest {
    pub company_name: String,
    pub sector: String,
    pub website_url: Option<String>,
    pub contact_email: Option<String>,
}

#[derive(Serialize)]
pub struct AuditSummaryResponse {
    pub id: Uuid,
    pub company_name: String,
    pub sector: String,
    pub status: String,
    pub total_claims: i32,
    pub global_score: Option<f64>,
    pub risk_level: Option<String>,
    pub created_at: String,
    pub completed_at: Option<String>,
}

impl From<&Audit> for AuditSummaryResponse {
    fn from(a: &Audit) -> Self {
        Self {
            id: a.id,
            company_name: a.company_name.clone(),
            sector: a.sector.clone(),
            status: a.status.clone(),
            total_claims: a.total_claims,
            global_score: a.global_score,
            risk_level: a.risk_level.clone(),
            created_at: a.created_at.to_rfc3339(),
            completed_at: a.completed_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Serialize)]
pub struct ClaimResultResponse {
    pub id: Uuid,
    pub criterion: String,
    pub verdict: String,
    pub explanation: String,
    pub recommendation: Option<String>,
    pub regulation_reference: Option<String>,
}

impl From<ClaimResult> for ClaimResultResponse {
    fn from(r: ClaimResult) -> Self {
        Self {
            id: r.id,
            criterion: r.criterion,
            verdict: r.verdict,
            explanation: r.explanation,
            recommendation: r.recommendation,
            regulation_reference: r.regulation_reference,
        }
    }
}

#[derive(Serialize)]
pub struct ClaimWithResultsResponse {
    pub id: Uuid,
    pub claim_text: String,
    pub support_type: String,
    pub scope: String,
    pub overall_verdict: Option<String>,
    pub results: Vec<ClaimResultResponse>,
}

#[derive(Serialize)]
pub struct AuditResultsResponse {
    pub audit_id: Uuid,
    pub company_name: String,
    pub status: String,
    pub website_url: Option<String>,
    pub total_claims: i32,
    pub conforming_claims: i32,
    pub non_conforming_claims: i32,
    pub at_risk_claims: i32,
    pub global_score: Option<f64>,
    pub risk_level: Option<String>,
    pub claims: Vec<ClaimWithResultsResponse>,
}

/// Fetch an audit owned by the authenticated partner.
pub async fn fetch_partner_audit(
    db: &sqlx::PgPool,
    audit_id: Uuid,
    partner_id: Uuid,
) -> Result<Audit, ApiError> {
    sqlx::query_as::<_, Audit>("SELECT * FROM audits WHERE id = $1 AND partner_id = $2")
        .bind(audit_id)
        .bind(partner_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Audit introuvable".to_string()))
}

/// Claims of an audit with their criterion results attached.
async fn load_claims_with_results(
    db: &sqlx::PgPool,
    audit_id: Uuid,
) -> Result<Vec<ClaimWithResultsResponse>, ApiError> {
    let claims = sqlx::query_as::<_, Claim>(
        "SELECT * FROM claims WHERE audit_id = $1 ORDER BY created_at",
    )
    .bind(audit_id)
    .fetch_all(db)
    .await?;

    let results = sqlx::query_as::<_, ClaimResult>(
        "SELECT cr.* FROM claim_results cr \
         JOIN claims c ON c.id = cr.claim_id \
         WHERE c.audit_id = $1",
    )
    .bind(audit_id)
    .fetch_all(db)
    .await?;

    let mut by_claim: HashMap<Uuid, Vec<ClaimResult>> = HashMap::new();
    for result in results {
        by_claim.entry(result.claim_id).or_default().push(result);
    }

    Ok(claims
        .into_iter()
        .map(|c| {
            let mut claim_results: Vec<ClaimResultResponse> = by_claim
                .remove(&c.id)
                .unwrap_or_default()
                .into_iter()
                .map(ClaimResultResponse::from)
                .collect();
            // Present results in the fixed criterion order
            claim_results.sort_by_key(|r| {
                ga_core::ALL_CRITERIA
                    .iter()
                    .position(|criterion| criterion.as_str() == r.criterion)
                    .unwrap_or(usize::MAX)
            });
            ClaimWithResultsResponse {
                id: c.id,
                claim_text: c.claim_text,
                support_type: c.support_type,
                scope: c.scope,
                overall_verdict: c.overall_verdict,
                results: claim_results,
            }
        })
        .collect())
}

async fn build_results_response(
    db: &sqlx::PgPool,
    audit: &Audit,
) -> Result<AuditResultsResponse, ApiError> {
    let claims = load_claims_with_results(db, audit.id).await?;
    Ok(AuditResultsResponse {
        audit_id: audit.id,
        company_name: audit.company_name.clone(),
        status: audit.status.clone(),
        website_url: audit.website_url.clone(),
        total_claims: audit.total_claims,
        conforming_claims: audit.conforming_claims,
        non_conforming_claims: audit.non_conforming_claims,
        at_risk_claims: audit.at_risk_claims,
        global_score: audit.global_score,
        risk_level: audit.risk_level.clone(),
        claims,
    })
}

pub async fn create_audit(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Json(payload): Json<CreateAuditRequest>,
) -> Result<(StatusCode, Json<AuditSummaryResponse>), ApiError> {
    let audit = sqlx::query_as::<_, Audit>(
        "INSERT INTO audits (id, partner_id, company_name, sector, website_url, contact_email) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(partner.id)
    .bind(&payload.company_name)
    .bind(&payload.sector)
    .bind(&payload.website_url)
    .bind(&payload.contact_email)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json((&audit).into())))
}

pub async fn list_audits(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
) -> Result<Json<Vec<AuditSummaryResponse>>, ApiError> {
    let audits = sqlx::query_as::<_, Audit>(
        "SELECT * FROM audits WHERE partner_id = $1 ORDER BY created_at DESC",
    )
    .bind(partner.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(audits.iter().map(AuditSummaryResponse::from).collect()))
}

pub async fn get_audit(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(id): Path<Uuid>,
) -> Result<Json<AuditResultsResponse>, ApiError> {
    let audit = fetch_partner_audit(&state.db, id, partner.id).await?;
    Ok(Json(build_results_response(&state.db, &audit).await?))
}

pub async fn delete_audit(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let audit = fetch_partner_audit(&state.db, id, partner.id).await?;

    if audit.status != "draft" {
        return Err(ApiError::BadRequest(
            "Seuls les audits en brouillon peuvent être supprimés".to_string(),
        ));
    }

    sqlx::query("DELETE FROM audits WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Run the six rules on every claim of the audit, replace all prior
/// results and recompute the audit aggregate in one transaction.
pub async fn analyze_audit(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(id): Path<Uuid>,
) -> Result<Json<AuditResultsResponse>, ApiError> {
    let audit = fetch_partner_audit(&state.db, id, partner.id).await?;

    let claims = sqlx::query_as::<_, Claim>(
        "SELECT * FROM claims WHERE audit_id = $1 ORDER BY created_at",
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    if claims.is_empty() {
        return Err(ApiError::BadRequest(
            "L'audit ne contient aucune claim à analyser".to_string(),
        ));
    }

    // Replace-all semantics: either the full new result set and the
    // updated aggregate land together, or nothing does.
    let mut tx = state.db.begin().await?;

    sqlx::query(
        "DELETE FROM claim_results WHERE claim_id IN (SELECT id FROM claims WHERE audit_id = $1)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let mut verdicts: Vec<&'static str> = Vec::with_capacity(claims.len());
    for claim_row in &claims {
        let analysis = ga_core::analyze_claim(&claim_row.to_engine());

        for result in &analysis.results {
            sqlx::query(
                "INSERT INTO claim_results \
                 (id, claim_id, criterion, verdict, explanation, recommendation, regulation_reference) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(Uuid::new_v4())
            .bind(claim_row.id)
            .bind(result.criterion.as_str())
            .bind(result.verdict.as_str())
            .bind(&result.explanation)
            .bind(&result.recommendation)
            .bind(&result.regulation_reference)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE claims SET overall_verdict = $2 WHERE id = $1")
            .bind(claim_row.id)
            .bind(analysis.overall.as_str())
            .execute(&mut *tx)
            .await?;

        verdicts.push(analysis.overall.as_str());
    }

    let counts = ga_core::compute_verdict_counts(verdicts.iter().copied());
    let (score, risk_level) =
        ga_core::calculate_global_score(counts.conforme, counts.risque, counts.non_conforme);

    sqlx::query(
        "UPDATE audits SET status = 'completed', total_claims = $2, conforming_claims = $3, \
         non_conforming_claims = $4, at_risk_claims = $5, global_score = $6, risk_level = $7, \
         completed_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .bind(claims.len() as i32)
    .bind(counts.conforme as i32)
    .bind(counts.non_conforme as i32)
    .bind(counts.risque as i32)
    .bind(score)
    .bind(risk_level.as_str())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let audit = fetch_partner_audit(&state.db, audit.id, partner.id).await?;
    Ok(Json(build_results_response(&state.db, &audit).await?))
}

pub async fn get_audit_results(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(id): Path<Uuid>,
) -> Result<Json<AuditResultsResponse>, ApiError> {
    let audit = fetch_partner_audit(&state.db, id, partner.id).await?;

    if audit.status != "completed" {
        return Err(ApiError::BadRequest(
            "L'audit n'a pas encore été analysé".to_string(),
        ));
    }

    Ok(Json(build_results_response(&state.db, &audit).await?))
}

//! Claim management routes

use crate::auth::AuthPartner;
use crate::db::schema::{Audit, Claim};
use crate::error::ApiError;
use crate::routes::audits::fetch_partner_audit;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct CreateClaimRequest {
    pub claim_text: String,
    pub support_type: String,
    pub scope: String,
    pub product_name: Option<String>,

    #[serde(default)]
    pub has_proof: bool,
    pub proof_description: Option<String>,
    pub proof_type: Option<String>,

    #[serde(default)]
    pub has_label: bool,
    pub label_name: Option<String>,
    pub label_is_certified: Option<bool>,

    #[serde(default)]
    pub is_future_commitment: bool,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub has_independent_verification: bool,
}

/// Partial update; absent fields keep their stored value.
#[derive(Deserialize)]
pub struct UpdateClaimRequest {
    pub claim_text: Option<String>,
    pub support_type: Option<String>,
    pub scope: Option<String>,
    pub product_name: Option<String>,

    pub has_proof: Option<bool>,
    pub proof_description: Option<String>,
    pub proof_type: Option<String>,

    pub has_label: Option<bool>,
    pub label_name: Option<String>,
    pub label_is_certified: Option<bool>,

    pub is_future_commitment: Option<bool>,
    pub target_date: Option<NaiveDate>,
    pub has_independent_verification: Option<bool>,
}

#[derive(Serialize)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub audit_id: Uuid,
    pub claim_text: String,
    pub support_type: String,
    pub scope: String,
    pub product_name: Option<String>,
    pub has_proof: bool,
    pub proof_description: Option<String>,
    pub proof_type: Option<String>,
    pub has_label: bool,
    pub label_name: Option<String>,
    pub label_is_certified: Option<bool>,
    pub is_future_commitment: bool,
    pub target_date: Option<NaiveDate>,
    pub has_independent_verification: bool,
    pub overall_verdict: Option<String>,
    pub created_at: String,
}

impl From<Claim> for ClaimResponse {
    fn from(c: Claim) -> Self {
        Self {
            id: c.id,
            audit_id: c.audit_id,
            claim_text: c.claim_text,
            support_type: c.support_type,
            scope: c.scope,
            product_name: c.product_name,
            has_proof: c.has_proof,
            proof_description: c.proof_description,
            proof_type: c.proof_type,
            has_label: c.has_label,
            label_name: c.label_name,
            label_is_certified: c.label_is_certified,
            is_future_commitment: c.is_future_commitment,
            target_date: c.target_date,
            has_independent_verification: c.has_independent_verification,
            overall_verdict: c.overall_verdict,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

fn validate_claim_fields(
    claim_text: Option<&str>,
    support_type: Option<&str>,
    scope: Option<&str>,
) -> Result<(), ApiError> {
    if let Some(text) = claim_text {
        if text.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "Le texte de l'allégation ne peut pas être vide".to_string(),
            ));
        }
    }
    if let Some(support) = support_type {
        if ga_core::SupportType::parse(support).is_none() {
            return Err(ApiError::BadRequest(format!(
                "Type de support inconnu : {}",
                support
            )));
        }
    }
    if let Some(scope) = scope {
        if ga_core::ClaimScope::parse(scope).is_none() {
            return Err(ApiError::BadRequest(format!("Scope inconnu : {}", scope)));
        }
    }
    Ok(())
}

/// Fetch a claim whose audit belongs to the authenticated partner.
async fn fetch_partner_claim(
    db: &sqlx::PgPool,
    claim_id: Uuid,
    partner_id: Uuid,
) -> Result<(Claim, Audit), ApiError> {
    let claim = sqlx::query_as::<_, Claim>(
        "SELECT c.* FROM claims c \
         JOIN audits a ON a.id = c.audit_id \
         WHERE c.id = $1 AND a.partner_id = $2",
    )
    .bind(claim_id)
    .bind(partner_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| ApiError::NotFound("Claim introuvable".to_string()))?;

    let audit = sqlx::query_as::<_, Audit>("SELECT * FROM audits WHERE id = $1")
        .bind(claim.audit_id)
        .fetch_one(db)
        .await?;

    Ok((claim, audit))
}

pub async fn create_claim(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(audit_id): Path<Uuid>,
    Json(payload): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let audit = fetch_partner_audit(&state.db, audit_id, partner.id).await?;

    if audit.status == "completed" {
        return Err(ApiError::BadRequest(
            "Impossible d'ajouter une claim à un audit terminé".to_string(),
        ));
    }

    validate_claim_fields(
        Some(&payload.claim_text),
        Some(&payload.support_type),
        Some(&payload.scope),
    )?;

    let claim = sqlx::query_as::<_, Claim>(
        "INSERT INTO claims \
         (id, audit_id, claim_text, support_type, scope, product_name, \
          has_proof, proof_description, proof_type, \
          has_label, label_name, label_is_certified, \
          is_future_commitment, target_date, has_independent_verification) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(audit.id)
    .bind(&payload.claim_text)
    .bind(&payload.support_type)
    .bind(&payload.scope)
    .bind(&payload.product_name)
    .bind(payload.has_proof)
    .bind(&payload.proof_description)
    .bind(&payload.proof_type)
    .bind(payload.has_label)
    .bind(&payload.label_name)
    .bind(payload.label_is_certified)
    .bind(payload.is_future_commitment)
    .bind(payload.target_date)
    .bind(payload.has_independent_verification)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(claim.into())))
}

pub async fn list_claims(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(audit_id): Path<Uuid>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    fetch_partner_audit(&state.db, audit_id, partner.id).await?;

    let claims = sqlx::query_as::<_, Claim>(
        "SELECT * FROM claims WHERE audit_id = $1 ORDER BY created_at",
    )
    .bind(audit_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(claims.into_iter().map(ClaimResponse::from).collect()))
}

pub async fn update_claim(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(claim_id): Path<Uuid>,
    Json(payload): Json<UpdateClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let (claim, audit) = fetch_partner_claim(&state.db, claim_id, partner.id).await?;

    if audit.status == "completed" {
        return Err(ApiError::BadRequest(
            "Impossible de modifier une claim d'un audit terminé".to_string(),
        ));
    }

    validate_claim_fields(
        payload.claim_text.as_deref(),
        payload.support_type.as_deref(),
        payload.scope.as_deref(),
    )?;

    let updated = sqlx::query_as::<_, Claim>(
        "UPDATE claims SET \
         claim_text = COALESCE($2, claim_text), \
         support_type = COALESCE($3, support_type), \
         scope = COALESCE($4, scope), \
         product_name = COALESCE($5, product_name), \
         has_proof = COALESCE($6, has_proof), \
         proof_description = COALESCE($7, proof_description), \
         proof_type = COALESCE($8, proof_type), \
         has_label = COALESCE($9, has_label), \
         label_name = COALESCE($10, label_name), \
         label_is_certified = COALESCE($11, label_is_certified), \
         is_future_commitment = COALESCE($12, is_future_commitment), \
         target_date = COALESCE($13, target_date), \
         has_independent_verification = COALESCE($14, has_independent_verification) \
         WHERE id = $1 RETURNING *",
    )
    .bind(claim.id)
    .bind(&payload.claim_text)
    .bind(&payload.support_type)
    .bind(&payload.scope)
    .bind(&payload.product_name)
    .bind(payload.has_proof)
    .bind(&payload.proof_description)
    .bind(&payload.proof_type)
    .bind(payload.has_label)
    .bind(&payload.label_name)
    .bind(payload.label_is_certified)
    .bind(payload.is_future_commitment)
    .bind(payload.target_date)
    .bind(payload.has_independent_verification)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated.into()))
}

pub async fn delete_claim(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(claim_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let (claim, audit) = fetch_partner_claim(&state.db, claim_id, partner.id).await?;

    if audit.status == "completed" {
        return Err(ApiError::BadRequest(
            "Impossible de supprimer une claim d'un audit terminé".to_string(),
        ));
    }

    sqlx::query("DELETE FROM claims WHERE id = $1")
        .bind(claim.id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

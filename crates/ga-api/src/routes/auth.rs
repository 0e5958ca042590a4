//! Authentication routes

use crate::auth::{create_token, hash_password, verify_password, AuthPartner};
use crate::db::schema::Partner;
use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Serialize)]
pub struct PartnerResponse {
    pub id: Uuid,
    pub email: String,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: bool,
}

impl From<Partner> for PartnerResponse {
    fn from(p: Partner) -> Self {
        Self {
            id: p.id,
            email: p.email,
            company_name: p.company_name,
            contact_name: p.contact_name,
            contact_phone: p.contact_phone,
            is_active: p.is_active,
        }
    }
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PartnerResponse>), ApiError> {
    let existing = sqlx::query_as::<_, Partner>("SELECT * FROM partners WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_some() {
        return Err(ApiError::Conflict(
            "Un compte avec cet email existe déjà".to_string(),
        ));
    }

    let partner = sqlx::query_as::<_, Partner>(
        "INSERT INTO partners (id, email, password_hash, company_name, contact_name, contact_phone) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&payload.email)
    .bind(hash_password(&payload.password))
    .bind(&payload.company_name)
    .bind(&payload.contact_name)
    .bind(&payload.contact_phone)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(partner.into())))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let partner = sqlx::query_as::<_, Partner>("SELECT * FROM partners WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await?;

    let partner = partner
        .filter(|p| verify_password(&payload.password, &p.password_hash))
        .ok_or_else(|| ApiError::Unauthorized("Email ou mot de passe incorrect".to_string()))?;

    if !partner.is_active {
        return Err(ApiError::Forbidden("Compte désactivé".to_string()));
    }

    let token = create_token(partner.id, &state.config.jwt_secret)
        .map_err(|e| ApiError::Internal(format!("Impossible d'émettre le jeton : {}", e)))?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

pub async fn me(AuthPartner(partner): AuthPartner) -> Json<PartnerResponse> {
    Json(partner.into())
}

//! Partner authentication — JWT bearer tokens

use crate::db::schema::Partner;
use crate::error::ApiError;
use crate::AppState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

const TOKEN_LIFETIME_HOURS: i64 = 24;

/// JWT payload: subject is the partner id
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: i64,
}

/// Issue a signed access token for a partner.
pub fn create_token(partner_id: Uuid, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp();
    let claims = TokenClaims {
        sub: partner_id.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate a token and return the partner id it was issued for.
pub fn verify_token(token: &str, secret: &str) -> Option<Uuid> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    Uuid::parse_str(&data.claims.sub).ok()
}

pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    hash_password(password) == password_hash
}

/// Extractor resolving the bearer token to the active partner row
pub struct AuthPartner(pub Partner);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthPartner {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Jeton d'authentification requis".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Jeton d'authentification invalide".to_string()))?;

        let partner_id = verify_token(token, &state.config.jwt_secret)
            .ok_or_else(|| ApiError::Unauthorized("Jeton expiré ou invalide".to_string()))?;

        let partner = sqlx::query_as::<_, Partner>("SELECT * FROM partners WHERE id = $1")
            .bind(partner_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Compte introuvable".to_string()))?;

        if !partner.is_active {
            return Err(ApiError::Forbidden("Compte désactivé".to_string()));
        }

        Ok(AuthPartner(partner))
    }
}

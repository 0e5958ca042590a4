//! Monitoring routes — per-audit configuration and alerts

use crate::auth::AuthPartner;
use crate::db::schema::{MonitoringAlert, MonitoringConfig};
use crate::error::ApiError;
use crate::routes::audits::fetch_partner_audit;
use crate::workers::monitor::run_monitoring_check;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

fn default_frequency_days() -> i32 {
    7
}

#[derive(Deserialize)]
pub struct EnableMonitoringRequest {
    #[serde(default = "default_frequency_days")]
    pub frequency_days: i32,
}

#[derive(Serialize)]
pub struct AlertResponse {
    pub id: Uuid,
    pub claim_text: String,
    pub source_url: Option<String>,
    pub is_read: bool,
    pub detected_at: String,
}

impl From<MonitoringAlert> for AlertResponse {
    fn from(a: MonitoringAlert) -> Self {
        Self {
            id: a.id,
            claim_text: a.claim_text,
            source_url: a.source_url,
            is_read: a.is_read,
            detected_at: a.detected_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct MonitoringConfigResponse {
    pub id: Uuid,
    pub audit_id: Uuid,
    pub is_active: bool,
    pub frequency_days: i32,
    pub last_checked_at: Option<String>,
    pub next_check_at: Option<String>,
    pub unread_alerts_count: usize,
    pub alerts: Vec<AlertResponse>,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub alerts_created: usize,
}

async fn build_config_response(
    db: &sqlx::PgPool,
    config: MonitoringConfig,
) -> Result<MonitoringConfigResponse, ApiError> {
    let alerts = sqlx::query_as::<_, MonitoringAlert>(
        "SELECT * FROM monitoring_alerts WHERE monitoring_config_id = $1 ORDER BY detected_at DESC",
    )
    .bind(config.id)
    .fetch_all(db)
    .await?;

    let unread_alerts_count = alerts.iter().filter(|a| !a.is_read).count();

    Ok(MonitoringConfigResponse {
        id: config.id,
        audit_id: config.audit_id,
        is_active: config.is_active,
        frequency_days: config.frequency_days,
        last_checked_at: config.last_checked_at.map(|t| t.to_rfc3339()),
        next_check_at: config.next_check_at.map(|t| t.to_rfc3339()),
        unread_alerts_count,
        alerts: alerts.into_iter().map(AlertResponse::from).collect(),
    })
}

async fn fetch_config(
    db: &sqlx::PgPool,
    audit_id: Uuid,
) -> Result<Option<MonitoringConfig>, ApiError> {
    Ok(sqlx::query_as::<_, MonitoringConfig>(
        "SELECT * FROM monitoring_configs WHERE audit_id = $1",
    )
    .bind(audit_id)
    .fetch_optional(db)
    .await?)
}

pub async fn enable_monitoring(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(audit_id): Path<Uuid>,
    Json(payload): Json<EnableMonitoringRequest>,
) -> Result<(StatusCode, Json<MonitoringConfigResponse>), ApiError> {
    let audit = fetch_partner_audit(&state.db, audit_id, partner.id).await?;

    if audit.status != "completed" {
        return Err(ApiError::BadRequest(
            "Le monitoring ne peut être activé que sur un audit terminé".to_string(),
        ));
    }
    if audit.website_url.is_none() {
        return Err(ApiError::BadRequest(
            "L'audit doit avoir une URL de site web pour activer le monitoring".to_string(),
        ));
    }

    let config = match fetch_config(&state.db, audit_id).await? {
        Some(existing) => {
            // Re-enable with the requested frequency
            sqlx::query_as::<_, MonitoringConfig>(
                "UPDATE monitoring_configs SET is_active = TRUE, frequency_days = $2 \
                 WHERE id = $1 RETURNING *",
            )
            .bind(existing.id)
            .bind(payload.frequency_days)
            .fetch_one(&state.db)
            .await?
        }
        None => {
            let next_check_at = Utc::now() + Duration::days(payload.frequency_days as i64);
            sqlx::query_as::<_, MonitoringConfig>(
                "INSERT INTO monitoring_configs (id, audit_id, frequency_days, next_check_at) \
                 VALUES ($1, $2, $3, $4) RETURNING *",
            )
            .bind(Uuid::new_v4())
            .bind(audit_id)
            .bind(payload.frequency_days)
            .bind(next_check_at)
            .fetch_one(&state.db)
            .await?
        }
    };

    let response = build_config_response(&state.db, config).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_monitoring(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(audit_id): Path<Uuid>,
) -> Result<Json<MonitoringConfigResponse>, ApiError> {
    fetch_partner_audit(&state.db, audit_id, partner.id).await?;

    let config = fetch_config(&state.db, audit_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Monitoring non configuré pour cet audit".to_string()))?;

    Ok(Json(build_config_response(&state.db, config).await?))
}

pub async fn disable_monitoring(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(audit_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    fetch_partner_audit(&state.db, audit_id, partner.id).await?;

    let config = fetch_config(&state.db, audit_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Monitoring non configuré pour cet audit".to_string()))?;

    sqlx::query("UPDATE monitoring_configs SET is_active = FALSE WHERE id = $1")
        .bind(config.id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_alert_read(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(alert_id): Path<Uuid>,
) -> Result<Json<AlertResponse>, ApiError> {
    // Ownership check goes through config -> audit -> partner
    let owned: Option<(Uuid,)> = sqlx::query_as(
        "SELECT ma.id FROM monitoring_alerts ma \
         JOIN monitoring_configs mc ON mc.id = ma.monitoring_config_id \
         JOIN audits a ON a.id = mc.audit_id \
         WHERE ma.id = $1 AND a.partner_id = $2",
    )
    .bind(alert_id)
    .bind(partner.id)
    .fetch_optional(&state.db)
    .await?;

    if owned.is_none() {
        return Err(ApiError::NotFound("Alerte introuvable".to_string()));
    }

    let alert = sqlx::query_as::<_, MonitoringAlert>(
        "UPDATE monitoring_alerts SET is_read = TRUE WHERE id = $1 RETURNING *",
    )
    .bind(alert_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(alert.into()))
}

pub async fn unread_summary(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
) -> Result<Json<HashMap<String, i64>>, ApiError> {
    let rows: Vec<(Uuid, i64)> = sqlx::query_as(
        "SELECT mc.audit_id, COUNT(ma.id) FROM monitoring_configs mc \
         JOIN monitoring_alerts ma ON ma.monitoring_config_id = mc.id \
         JOIN audits a ON a.id = mc.audit_id \
         WHERE a.partner_id = $1 AND ma.is_read = FALSE \
         GROUP BY mc.audit_id",
    )
    .bind(partner.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(audit_id, count)| (audit_id.to_string(), count))
            .collect(),
    ))
}

pub async fn trigger_check(
    State(state): State<Arc<AppState>>,
    AuthPartner(partner): AuthPartner,
    Path(audit_id): Path<Uuid>,
) -> Result<Json<CheckResponse>, ApiError> {
    fetch_partner_audit(&state.db, audit_id, partner.id).await?;

    let config = fetch_config(&state.db, audit_id)
        .await?
        .filter(|c| c.is_active)
        .ok_or_else(|| ApiError::NotFound("Monitoring non actif pour cet audit".to_string()))?;

    let alerts_created = run_monitoring_check(&state.db, config.id)
        .await
        .map_err(|e| ApiError::Internal(format!("Échec du check de monitoring : {}", e)))?;

    Ok(Json(CheckResponse { alerts_created }))
}

//! Background monitoring worker
//!
//! Periodically re-scrapes audited websites and raises alerts for
//! newly detected environmental claims.

use crate::db::schema::{Audit, MonitoringConfig};
use crate::workers::{extract, scrape};
use crate::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

const SCHEDULER_INTERVAL_SECS: u64 = 3_600;
const HTTP_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Mozilla/5.0 (compatible; GreenAuditBot/1.0)";

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Hourly scheduler loop: run every monitoring check that is due.
pub async fn run_scheduler(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(SCHEDULER_INTERVAL_SECS));
    loop {
        interval.tick().await;
        if let Err(e) = run_due_checks(&state.db).await {
            error!("Scheduler monitoring en erreur: {}", e);
        }
    }
}

/// Find active configs whose next check is due and run each one.
pub async fn run_due_checks(db: &PgPool) -> Result<(), MonitorError> {
    let due: Vec<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM monitoring_configs WHERE is_active = TRUE AND next_check_at <= NOW()",
    )
    .fetch_all(db)
    .await?;

    if due.is_empty() {
        return Ok(());
    }

    info!("Scheduler monitoring : {} check(s) à lancer", due.len());

    for (config_id,) in due {
        match run_monitoring_check(db, config_id).await {
            Ok(count) => info!("Monitoring {}: {} alertes créées", config_id, count),
            Err(e) => error!("Erreur monitoring check {}: {}", config_id, e),
        }
    }

    Ok(())
}

/// Run one monitoring check; returns the number of alerts created.
pub async fn run_monitoring_check(db: &PgPool, config_id: Uuid) -> Result<usize, MonitorError> {
    let config = sqlx::query_as::<_, MonitoringConfig>(
        "SELECT * FROM monitoring_configs WHERE id = $1",
    )
    .bind(config_id)
    .fetch_optional(db)
    .await?;

    let config = match config {
        Some(c) if c.is_active => c,
        _ => return Ok(0),
    };

    let audit = sqlx::query_as::<_, Audit>("SELECT * FROM audits WHERE id = $1")
        .bind(config.audit_id)
        .fetch_optional(db)
        .await?;

    let website_url = match audit.as_ref().and_then(|a| a.website_url.clone()) {
        Some(url) => url,
        None => {
            warn!("Config {} : audit sans website_url, skip", config_id);
            return Ok(0);
        }
    };

    let existing_claims: Vec<String> =
        sqlx::query_scalar("SELECT claim_text FROM claims WHERE audit_id = $1")
            .bind(config.audit_id)
            .fetch_all(db)
            .await?;

    info!(
        "Monitoring check — audit {} ({})",
        config.audit_id, website_url
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;

    let page_text = scrape::scrape_website(&client, &website_url).await;

    if page_text.trim().is_empty() {
        warn!("Aucun texte récupéré pour {}", website_url);
        update_timestamps(db, &config).await?;
        return Ok(0);
    }

    let candidates = extract::extract_candidate_claims(&page_text, &existing_claims);

    let mut alerts_created = 0;
    for claim_text in candidates {
        sqlx::query(
            "INSERT INTO monitoring_alerts (id, monitoring_config_id, claim_text, source_url) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(config.id)
        .bind(&claim_text)
        .bind(&website_url)
        .execute(db)
        .await?;
        alerts_created += 1;
    }

    update_timestamps(db, &config).await?;

    info!(
        "Monitoring check terminé — audit {} : {} nouvelles alertes",
        config.audit_id, alerts_created
    );
    Ok(alerts_created)
}

/// Advance last_checked_at and next_check_at by the configured frequency.
async fn update_timestamps(db: &PgPool, config: &MonitoringConfig) -> Result<(), MonitorError> {
    sqlx::query(
        "UPDATE monitoring_configs SET last_checked_at = NOW(), \
         next_check_at = NOW() + make_interval(days => $2) WHERE id = $1",
    )
    .bind(config.id)
    .bind(config.frequency_days)
    .execute(db)
    .await?;
    Ok(())
}

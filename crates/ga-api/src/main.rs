//! GreenAudit API Server

mod auth;
mod db;
mod error;
mod routes;
mod workers;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/greenaudit".to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "development-secret-change-in-production".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ga_api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GreenAudit API Server");

    let config = AppConfig::default();

    // Connect to database
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run migrations");

    info!("Database migrations complete");

    // Create shared state
    let state = Arc::new(AppState { db, config });

    // Spawn the monitoring scheduler
    tokio::spawn(workers::monitor::run_scheduler(state.clone()));

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(routes::health_check))

        // Authentication
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/me", get(routes::auth::me))

        // Audits
        .route("/api/audits", post(routes::audits::create_audit))
        .route("/api/audits", get(routes::audits::list_audits))
        .route("/api/audits/:id", get(routes::audits::get_audit))
        .route("/api/audits/:id", delete(routes::audits::delete_audit))
        .route("/api/audits/:id/analyze", post(routes::audits::analyze_audit))
        .route("/api/audits/:id/results", get(routes::audits::get_audit_results))

        // Claims
        .route("/api/audits/:id/claims", post(routes::claims::create_claim))
        .route("/api/audits/:id/claims", get(routes::claims::list_claims))
        .route("/api/claims/:id", put(routes::claims::update_claim))
        .route("/api/claims/:id", delete(routes::claims::delete_claim))

        // Reports
        .route("/api/audits/:id/report", get(routes::reports::get_report))
        .route("/api/audits/:id/report/download", get(routes::reports::download_report))

        // Monitoring
        .route("/api/audits/:id/monitoring", post(routes::monitoring::enable_monitoring))
        .route("/api/audits/:id/monitoring", get(routes::monitoring::get_monitoring))
        .route("/api/audits/:id/monitoring", delete(routes::monitoring::disable_monitoring))
        .route("/api/audits/:id/monitoring/check", post(routes::monitoring::trigger_check))
        .route("/api/monitoring/alerts/:id/read", patch(routes::monitoring::mark_alert_read))
        .route("/api/monitoring/unread-summary", get(routes::monitoring::unread_summary))

        // CORS
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))

        // Tracing
        .layer(TraceLayer::new_for_http())

        // State
        .with_state(state.clone());

    // Start server
    let addr = state.config.bind_addr.clone();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}

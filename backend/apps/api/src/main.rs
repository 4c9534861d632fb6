//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use contact::{InMemorySessionStore, SendmailTransport, SessionStore, contact_router};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

use kernel::error::app_error::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,contact=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        mail_mode = ?config.contact.mail_mode,
        sendmail = %config.sendmail_path.display(),
        trust_forwarded_for = config.contact.trust_forwarded_for,
        "Contact configuration loaded"
    );

    let store = InMemorySessionStore::new();
    let mailer = SendmailTransport::new(config.sendmail_path.clone());

    // Idle session sweeper
    tokio::spawn(sweep_sessions(
        store.clone(),
        config.sweep_interval,
        config.contact.session_ttl_secs(),
    ));

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            http::HeaderName::from_static("x-requested-with"),
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(contact_router(store, mailer, config.contact))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> AppError {
    AppError::not_found("Resource not found")
}

/// Periodically drop sessions idle longer than `ttl_secs`.
/// Errors are logged and the loop keeps going.
async fn sweep_sessions(store: InMemorySessionStore, every: Duration, ttl_secs: i64) {
    let mut interval = tokio::time::interval(every);
    // The first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        let cutoff = chrono::Utc::now().timestamp().saturating_sub(ttl_secs);
        match store.sweep_idle(cutoff).await {
            Ok(0) => {}
            Ok(removed) => {
                tracing::info!(sessions_deleted = removed, "Contact session cleanup completed");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Contact session cleanup failed, continuing anyway");
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

//! tourney-registry server entry point.
//!
//! Starts the Axum HTTP server over the storage backend selected by the
//! configuration present at startup.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use tourney_registry::api;
use tourney_registry::app_state::AppState;
use tourney_registry::config::AppConfig;
use tourney_registry::evidence::DiskEvidenceStore;
use tourney_registry::notify::{Notifier, WebhookNotifier};
use tourney_registry::persistence;
use tourney_registry::service::RegistrationService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting tourney-registry");

    // Storage backend, selected once
    let store = persistence::connect(&config.backend).await?;

    // Notification channel (optional)
    let notifier: Option<Arc<dyn Notifier>> = match &config.notify_webhook_url {
        Some(url) => {
            tracing::info!("notification webhook configured");
            Some(Arc::new(WebhookNotifier::new(url.clone())?))
        }
        None => {
            tracing::info!("no notification channel configured; verifications will skip email");
            None
        }
    };

    // Evidence file store
    std::fs::create_dir_all(&config.uploads_dir)?;
    let evidence = Arc::new(DiskEvidenceStore::new(&config.uploads_dir));

    // Lifecycle controller and application state
    let service = Arc::new(RegistrationService::new(store, notifier, evidence));
    let app_state = AppState { service };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

//! Application builder: wires stores, cache, and services into an
//! Axum app, and runs the server.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use agora_cache::provider::CacheManager;
use agora_core::config::AppConfig;
use agora_core::error::AppError;
use agora_core::result::AppResult;
use agora_database::Stores;
use agora_service::{PresenceService, SubscriptionService};

use crate::router::{build_cors_layer, build_router};
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Assembles `AppState` from configuration and an already-built store
/// set. Split out of [`run_server`] so integration tests can wire
/// in-memory stores through the same path.
pub fn build_state(config: AppConfig, stores: Stores) -> AppResult<AppState> {
    let cache = Arc::new(CacheManager::new(&config.cache)?);

    let presence = Arc::new(PresenceService::new(
        Arc::clone(&stores.activity),
        Arc::clone(&stores.directory),
        config.presence.clone(),
    ));
    let subscriptions = Arc::new(SubscriptionService::new(
        Arc::clone(&stores.subscriptions),
        Arc::clone(&cache),
    ));

    Ok(AppState {
        config: Arc::new(config),
        presence,
        subscriptions,
        directory: stores.directory,
        cache,
    })
}

/// Runs the Agora server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting Agora server...");

    let stores = agora_database::build_stores(&config.database).await?;

    let purge_interval = config.presence.purge_interval_seconds;
    let state = build_state(config, stores)?;

    if purge_interval > 0 {
        spawn_purge_task(Arc::clone(&state.presence), purge_interval);
    }

    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Agora server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

/// Periodically drops activity rows that fell out of the presence
/// window long enough ago to be unrecoverable.
fn spawn_purge_task(presence: Arc<PresenceService>, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_seconds));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match presence.purge_stale(chrono::Utc::now()).await {
                Ok(0) => {}
                Ok(n) => info!(purged = n, "Purged stale activity records"),
                Err(e) => tracing::warn!(error = %e, "Activity purge failed"),
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    }
}

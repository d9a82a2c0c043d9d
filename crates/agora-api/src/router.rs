//! Route definitions for the Agora HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(presence_routes())
        .merge(subscription_routes())
        .merge(thread_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Presence heartbeat and aggregation
fn presence_routes() -> Router<AppState> {
    Router::new()
        .route("/presence/heartbeat", post(handlers::presence::heartbeat))
        .route("/presence", get(handlers::presence::snapshot))
}

/// Subscription lifecycle and listing
fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/subscriptions", get(handlers::subscription::list))
        .route("/subscriptions", delete(handlers::subscription::unsubscribe))
        .route(
            "/subscriptions/unseen",
            get(handlers::subscription::has_unseen),
        )
        .route(
            "/subscriptions/{thread_id}",
            post(handlers::subscription::subscribe),
        )
        .route(
            "/subscriptions/{thread_id}/seen",
            post(handlers::subscription::mark_seen),
        )
        .route(
            "/subscriptions/{thread_id}/unseen",
            post(handlers::subscription::mark_unseen),
        )
}

/// Thread-lifecycle hooks for the thread/post collaborator
fn thread_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/threads/{thread_id}/activity",
            post(handlers::thread::new_activity),
        )
        .route("/threads/{thread_id}", delete(handlers::thread::deleted))
}

/// Health check endpoints (no identity required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration
pub fn build_cors_layer(config: &agora_core::config::app::CorsConfig) -> CorsLayer {
    use axum::http::HeaderValue;
    use tower_http::cors::Any;

    if config.allowed_origins.contains(&"*".to_string()) {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any)
    }
}

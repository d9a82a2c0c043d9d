//! Application state shared across all handlers.

use std::sync::Arc;

use agora_cache::CacheManager;
use agora_core::config::AppConfig;
use agora_core::traits::directory::IdentityDirectory;
use agora_service::{PresenceService, SubscriptionService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Presence aggregation and heartbeat recording.
    pub presence: Arc<PresenceService>,
    /// Subscription lifecycle and cached aggregates.
    pub subscriptions: Arc<SubscriptionService>,
    /// User display tag directory, used by the identity extractor.
    pub directory: Arc<dyn IdentityDirectory>,
    /// Cache manager, exposed for health checks.
    pub cache: Arc<CacheManager>,
}

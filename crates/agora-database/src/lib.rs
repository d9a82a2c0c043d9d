//! # agora-database
//!
//! Store implementations for Agora. The PostgreSQL repositories live in
//! [`repositories`]; dashmap-backed in-memory implementations of the
//! same traits live in [`memory`] and back tests and single-node
//! deployments. [`build_stores`] selects between them from
//! configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

use std::sync::Arc;

use tracing::info;

use agora_core::config::database::DatabaseConfig;
use agora_core::error::AppError;
use agora_core::result::AppResult;
use agora_core::traits::directory::IdentityDirectory;
use agora_entity::activity::ActivityStore;
use agora_entity::subscription::SubscriptionStore;

/// The full set of stores the services are wired with.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Heartbeat records.
    pub activity: Arc<dyn ActivityStore>,
    /// Subscription records.
    pub subscriptions: Arc<dyn SubscriptionStore>,
    /// User display tags.
    pub directory: Arc<dyn IdentityDirectory>,
}

/// Build the configured store set.
///
/// Postgres mode connects a pool, runs migrations, and returns the sqlx
/// repositories; memory mode returns fresh in-process stores.
pub async fn build_stores(config: &DatabaseConfig) -> AppResult<Stores> {
    match config.mode.as_str() {
        "postgres" => {
            let pool = connection::DatabasePool::connect(config).await?;
            migration::run_migrations(pool.pool()).await?;
            let pool = pool.into_pool();
            Ok(Stores {
                activity: Arc::new(repositories::activity::ActivityRepository::new(pool.clone())),
                subscriptions: Arc::new(
                    repositories::subscription::SubscriptionRepository::new(pool.clone()),
                ),
                directory: Arc::new(repositories::directory::UserDirectoryRepository::new(pool)),
            })
        }
        "memory" => {
            info!("Using in-memory stores");
            Ok(Stores {
                activity: Arc::new(memory::activity::MemoryActivityStore::new()),
                subscriptions: Arc::new(memory::subscription::MemorySubscriptionStore::new()),
                directory: Arc::new(memory::directory::MemoryDirectory::new()),
            })
        }
        other => Err(AppError::configuration(format!(
            "Unknown database mode '{other}'. Expected 'postgres' or 'memory'"
        ))),
    }
}

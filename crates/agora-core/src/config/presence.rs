//! Presence window configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for presence aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Trailing window in seconds. A heartbeat older than this is stale
    /// and excluded from presence reads.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
    /// How often the stale-row purge task runs, in seconds. Zero
    /// disables the task; staleness is still enforced at read time.
    #[serde(default = "default_purge_interval")]
    pub purge_interval_seconds: u64,
    /// Age beyond the window at which stale rows are deleted, in
    /// seconds. Purging is storage hygiene, not a correctness step.
    #[serde(default = "default_purge_grace")]
    pub purge_grace_seconds: u64,
}

impl PresenceConfig {
    /// The trailing window as a [`Duration`].
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window(),
            purge_interval_seconds: default_purge_interval(),
            purge_grace_seconds: default_purge_grace(),
        }
    }
}

fn default_window() -> u64 {
    300
}

fn default_purge_interval() -> u64 {
    600
}

fn default_purge_grace() -> u64 {
    3600
}

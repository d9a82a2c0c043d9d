//! Activity store contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use agora_core::result::AppResult;
use agora_core::types::id::UserId;
use agora_core::types::query::PresenceQuery;

use super::model::ActivityRecord;

/// Durable store of heartbeat records.
///
/// The presence subsystem is the sole owner of this data: `upsert` is
/// the only write path, and reads are scoped by a [`PresenceQuery`]
/// carrying the window start, section prefix, and optional exclusion.
#[async_trait]
pub trait ActivityStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert or overwrite the subject's single record. Last write wins
    /// on `section` and `observed_at` under concurrent heartbeats.
    async fn upsert(&self, record: ActivityRecord) -> AppResult<()>;

    /// Live named (non-anonymous) viewers matching the query, ordered by
    /// most recent heartbeat first. The excluded user never appears.
    async fn named_viewers(&self, query: &PresenceQuery) -> AppResult<Vec<UserId>>;

    /// Number of live anonymous-but-authenticated records matching the
    /// query. Does not apply self-inclusion; that is aggregator logic.
    async fn anonymous_count(&self, query: &PresenceQuery) -> AppResult<u64>;

    /// Number of live guest records matching the query.
    async fn guest_count(&self, query: &PresenceQuery) -> AppResult<u64>;

    /// Delete records last observed before `cutoff`. Returns the number
    /// removed. Storage hygiene only; staleness never depends on it.
    async fn purge_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

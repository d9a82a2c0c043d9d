//! Presence service: heartbeat recording and "who is browsing here"
//! aggregation over a trailing time window.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use agora_core::config::presence::PresenceConfig;
use agora_core::result::AppResult;
use agora_core::traits::directory::IdentityDirectory;
use agora_core::types::query::PresenceQuery;
use agora_entity::activity::{ActivityRecord, ActivityStore};

use crate::context::{RequestContext, Requester};

/// A rendered presence view for one section: display tags of named
/// viewers plus anonymous and guest counts. The requester appears
/// exactly once, in the bucket matching their own identity class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    /// Display tags of named viewers, requester's own tag first when the
    /// requester is named. Ordered by most recent heartbeat.
    pub viewers: Vec<String>,
    /// Anonymous-but-authenticated viewer count.
    pub anonymous: u64,
    /// Guest viewer count.
    pub guests: u64,
}

/// Aggregates live heartbeat records into per-section viewer lists and
/// counts. Section matching is prefix-based, so one query answers "who
/// is anywhere under this forum"; liveness is a pure comparison against
/// the request clock and needs no background decay.
#[derive(Debug, Clone)]
pub struct PresenceService {
    activity: Arc<dyn ActivityStore>,
    directory: Arc<dyn IdentityDirectory>,
    config: PresenceConfig,
}

impl PresenceService {
    /// Creates a new presence service.
    pub fn new(
        activity: Arc<dyn ActivityStore>,
        directory: Arc<dyn IdentityDirectory>,
        config: PresenceConfig,
    ) -> Self {
        Self {
            activity,
            directory,
            config,
        }
    }

    fn window_start(&self, ctx: &RequestContext) -> DateTime<Utc> {
        ctx.request_time - chrono::TimeDelta::seconds(self.config.window_seconds as i64)
    }

    /// Records a heartbeat for the requester at the given section. This
    /// is called on every page render and is the sole write path into
    /// presence data; a repeat heartbeat overwrites the subject's
    /// previous section and timestamp.
    pub async fn heartbeat(&self, ctx: &RequestContext, section: &str) -> AppResult<()> {
        let record = ActivityRecord::new(ctx.requester.subject(), section, ctx.request_time);
        self.activity.upsert(record).await
    }

    /// Display tags of live named viewers under the section prefix. The
    /// requester is always excluded from this listing; their presence is
    /// reflected through [`Self::snapshot`] instead.
    pub async fn named_viewers(&self, ctx: &RequestContext, section: &str) -> AppResult<Vec<String>> {
        let mut query = PresenceQuery::new(section, self.window_start(ctx));
        if let Some(user) = ctx.requester.user_id() {
            query = query.excluding(user);
        }

        let users = self.activity.named_viewers(&query).await?;
        let tags = self.directory.display_tags(&users).await?;

        // Unknown users still count as viewers; render their id.
        Ok(users
            .iter()
            .zip(tags)
            .map(|(user, tag)| tag.unwrap_or_else(|| user.to_string()))
            .collect())
    }

    /// Number of live anonymous-but-authenticated viewers under the
    /// prefix, plus one when the requester is itself browsing
    /// anonymously. The requester's own stored heartbeat is excluded so
    /// the self-increment never double-counts.
    pub async fn anonymous_count(&self, ctx: &RequestContext, section: &str) -> AppResult<u64> {
        let mut query = PresenceQuery::new(section, self.window_start(ctx));
        if let Some(user) = ctx.requester.user_id() {
            query = query.excluding(user);
        }

        let mut count = self.activity.anonymous_count(&query).await?;
        if matches!(ctx.requester, Requester::Anonymous { .. }) {
            count += 1;
        }
        Ok(count)
    }

    /// Number of live guest viewers under the prefix, plus one when the
    /// requester is itself a guest. Excludes the requester's own stored
    /// heartbeat, as above.
    pub async fn guest_count(&self, ctx: &RequestContext, section: &str) -> AppResult<u64> {
        let mut query = PresenceQuery::new(section, self.window_start(ctx));
        if let Requester::Guest { session } = ctx.requester {
            query = query.excluding_session(session);
        }

        let mut count = self.activity.guest_count(&query).await?;
        if matches!(ctx.requester, Requester::Guest { .. }) {
            count += 1;
        }
        Ok(count)
    }

    /// Full presence view for one section. Composes the three reads and
    /// prepends the requester's own tag when they are named, so the
    /// requester shows up exactly once across the three buckets.
    pub async fn snapshot(&self, ctx: &RequestContext, section: &str) -> AppResult<PresenceSnapshot> {
        let mut viewers = self.named_viewers(ctx, section).await?;
        if let Requester::Named { tag, .. } = &ctx.requester {
            viewers.insert(0, tag.clone());
        }

        Ok(PresenceSnapshot {
            viewers,
            anonymous: self.anonymous_count(ctx, section).await?,
            guests: self.guest_count(ctx, section).await?,
        })
    }

    /// Deletes records stale beyond the purge grace. Hygiene only; reads
    /// already ignore anything outside the window.
    pub async fn purge_stale(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let grace = self.config.window_seconds + self.config.purge_grace_seconds;
        let cutoff = now - chrono::TimeDelta::seconds(grace as i64);
        let removed = self.activity.purge_stale(cutoff).await?;
        if removed > 0 {
            debug!(removed, "Purged stale activity records");
        }
        Ok(removed)
    }
}

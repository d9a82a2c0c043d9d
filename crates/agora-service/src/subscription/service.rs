//! Subscription lifecycle service.
//!
//! Every mutating operation commits to the store first and then
//! invalidates the affected user's cached unseen aggregate; a crash
//! between the two steps leaves bounded staleness that self-heals on the
//! next invalidating mutation. Cache failures never reach callers.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use agora_cache::CacheManager;
use agora_cache::keys;
use agora_core::error::AppError;
use agora_core::result::AppResult;
use agora_core::traits::cache::CacheProvider;
use agora_core::types::id::{ThreadId, UserId};
use agora_core::types::pagination::{PageRequest, PageResponse};
use agora_entity::subscription::{BatchRemoval, SeenState, SubscriptionRecord, SubscriptionStore};

/// Orchestrates subscribe/unsubscribe/mark operations against the
/// subscription store and keeps the per-user cached aggregate coherent.
#[derive(Debug, Clone)]
pub struct SubscriptionService {
    store: Arc<dyn SubscriptionStore>,
    cache: Arc<CacheManager>,
}

impl SubscriptionService {
    /// Creates a new subscription service.
    pub fn new(store: Arc<dyn SubscriptionStore>, cache: Arc<CacheManager>) -> Self {
        Self { store, cache }
    }

    /// Drop the cached aggregate for a user. Cache failures degrade to a
    /// warning; the next read recomputes from the store either way.
    async fn invalidate(&self, user: UserId) {
        if let Err(e) = self.cache.delete(&keys::unseen_subscriptions(user)).await {
            warn!(%user, error = %e, "Failed to invalidate subscription cache");
        }
    }

    /// Subscribes a user to a thread. The new subscription starts in the
    /// `Seen` state. Fails with a conflict when the pair already exists,
    /// leaving the existing record untouched.
    pub async fn subscribe(&self, user: UserId, thread: ThreadId) -> AppResult<SubscriptionRecord> {
        let record = SubscriptionRecord::new(user, thread, Utc::now());
        if !self.store.insert(&record).await? {
            return Err(AppError::conflict(format!(
                "Already subscribed to thread {thread}"
            )));
        }

        info!(%user, %thread, "Subscribed to thread");
        self.invalidate(user).await;
        Ok(record)
    }

    /// Removes a batch of subscriptions for one user, attempting each
    /// thread id independently. Missing ids and store failures are
    /// reported in the outcome rather than aborting the rest of the
    /// batch.
    pub async fn unsubscribe(&self, user: UserId, threads: &[ThreadId]) -> AppResult<BatchRemoval> {
        let mut outcome = BatchRemoval::default();

        for &thread in threads {
            match self.store.remove(user, thread).await {
                Ok(true) => outcome.removed += 1,
                Ok(false) => outcome.missing.push(thread),
                Err(e) => {
                    warn!(%user, %thread, error = %e, "Failed to remove subscription");
                    outcome.failed.push(thread);
                }
            }
        }

        if outcome.removed > 0 {
            info!(%user, removed = outcome.removed, "Unsubscribed from threads");
            self.invalidate(user).await;
        }
        Ok(outcome)
    }

    /// Marks a subscription seen. Succeeds as a no-op when already seen;
    /// fails with not-found when the user has no subscription for the
    /// thread. Called when the user opens the thread or marks it from
    /// the subscriptions screen.
    pub async fn mark_seen(&self, user: UserId, thread: ThreadId) -> AppResult<()> {
        self.transition(user, thread, SeenState::Seen).await
    }

    /// Marks a subscription unseen, the inverse of [`Self::mark_seen`]
    /// with the same no-op and not-found behavior.
    pub async fn mark_unseen(&self, user: UserId, thread: ThreadId) -> AppResult<()> {
        self.transition(user, thread, SeenState::Unseen).await
    }

    async fn transition(&self, user: UserId, thread: ThreadId, target: SeenState) -> AppResult<()> {
        let record = self
            .store
            .find(user, thread)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No subscription for thread {thread}")))?;

        if record.state == target {
            return Ok(());
        }

        if !self.store.set_state(user, thread, target).await? {
            // The record vanished between find and update; treat like a
            // plain miss.
            return Err(AppError::not_found(format!(
                "No subscription for thread {thread}"
            )));
        }

        self.invalidate(user).await;
        Ok(())
    }

    /// Flips every subscriber of the thread to unseen, except the poster
    /// whose own subscription stays untouched. Called by the thread/post
    /// collaborator whenever new content is committed. Returns the
    /// number of subscriptions flipped.
    pub async fn notify_new_activity(
        &self,
        thread: ThreadId,
        excluding: Option<UserId>,
    ) -> AppResult<u64> {
        let affected = self.store.mark_unseen_for_thread(thread, excluding).await?;

        for &user in &affected {
            self.invalidate(user).await;
        }
        if !affected.is_empty() {
            info!(%thread, subscribers = affected.len(), "Marked thread unseen for subscribers");
        }
        Ok(affected.len() as u64)
    }

    /// Removes every subscription for a deleted thread. Called by the
    /// thread-lifecycle collaborator. Returns the number removed.
    pub async fn purge_thread(&self, thread: ThreadId) -> AppResult<u64> {
        let affected = self.store.remove_thread(thread).await?;

        for &user in &affected {
            self.invalidate(user).await;
        }
        if !affected.is_empty() {
            info!(%thread, subscribers = affected.len(), "Removed subscriptions of deleted thread");
        }
        Ok(affected.len() as u64)
    }

    /// Whether the user has any unseen subscription. Served from the
    /// cache when possible; recomputed from the store and re-cached on a
    /// miss. The cache is purely an optimization: read and write
    /// failures degrade silently to direct store access.
    pub async fn has_unseen(&self, user: UserId) -> AppResult<bool> {
        let key = keys::unseen_subscriptions(user);

        match self.cache.get_json::<bool>(&key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(%user, error = %e, "Subscription cache read failed"),
        }

        let fresh = self.store.has_unseen(user).await?;

        if let Err(e) = self.cache.set_json(&key, &fresh).await {
            warn!(%user, error = %e, "Subscription cache write failed");
        }
        Ok(fresh)
    }

    /// Paginated listing of the user's subscriptions, newest first.
    pub async fn subscriptions(
        &self,
        user: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SubscriptionRecord>> {
        self.store.find_by_user(user, page).await
    }
}

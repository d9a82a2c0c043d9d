//! Subscription store contract.

use async_trait::async_trait;

use agora_core::result::AppResult;
use agora_core::types::id::{ThreadId, UserId};
use agora_core::types::pagination::{PageRequest, PageResponse};

use super::model::{SeenState, SubscriptionRecord};

/// Durable store of subscription records, keyed by (user, thread).
///
/// Mutations return `bool` rather than erroring on absence or conflict;
/// the lifecycle service translates those into the caller-facing error
/// taxonomy. Store-level failures propagate as errors.
#[async_trait]
pub trait SubscriptionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a single subscription.
    async fn find(&self, user: UserId, thread: ThreadId) -> AppResult<Option<SubscriptionRecord>>;

    /// Insert a new record. Returns `false` when the (user, thread) pair
    /// already exists, leaving the existing record untouched.
    async fn insert(&self, record: &SubscriptionRecord) -> AppResult<bool>;

    /// Set the seen state. Returns `false` when no record exists.
    async fn set_state(&self, user: UserId, thread: ThreadId, state: SeenState) -> AppResult<bool>;

    /// Remove a single subscription. Returns `false` when absent.
    async fn remove(&self, user: UserId, thread: ThreadId) -> AppResult<bool>;

    /// Flip every subscriber of `thread` to `Unseen`, except `exclude`.
    /// Returns the users whose records actually transitioned.
    async fn mark_unseen_for_thread(
        &self,
        thread: ThreadId,
        exclude: Option<UserId>,
    ) -> AppResult<Vec<UserId>>;

    /// Remove every subscription for `thread`. Returns the affected
    /// users. Called when the thread itself is deleted.
    async fn remove_thread(&self, thread: ThreadId) -> AppResult<Vec<UserId>>;

    /// Paginated listing of a user's subscriptions, newest first.
    async fn find_by_user(
        &self,
        user: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SubscriptionRecord>>;

    /// Whether the user has at least one `Unseen` subscription.
    async fn has_unseen(&self, user: UserId) -> AppResult<bool>;
}

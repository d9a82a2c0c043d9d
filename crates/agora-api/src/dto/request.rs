//! Request body DTOs.

use serde::{Deserialize, Serialize};

use agora_core::types::id::{ThreadId, UserId};

/// Body of `POST /api/presence/heartbeat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatRequest {
    /// Section the requester is viewing, e.g. `"forum/3/thread/9"`.
    pub section: String,
}

/// Query of `GET /api/presence`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceParams {
    /// Section prefix to aggregate over.
    pub section: String,
}

/// Body of `DELETE /api/subscriptions`, the batch-removal form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsubscribeRequest {
    /// Thread ids selected for removal.
    pub thread_ids: Vec<ThreadId>,
}

/// Body of `POST /api/threads/{thread_id}/activity`, sent by the
/// thread/post collaborator when new content is committed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThreadActivityRequest {
    /// The poster, whose own subscription is left untouched.
    pub poster: Option<UserId>,
}

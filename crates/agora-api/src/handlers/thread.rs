//! Thread-lifecycle hooks called by the thread/post collaborator.

use axum::Json;
use axum::extract::{Path, State};

use agora_core::types::id::ThreadId;

use crate::dto::request::ThreadActivityRequest;
use crate::dto::response::{AffectedResponse, ApiResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/threads/{thread_id}/activity
///
/// Fans new content out to subscribers: every subscription of the
/// thread flips to unseen, except the poster's own.
pub async fn new_activity(
    State(state): State<AppState>,
    Path(thread): Path<ThreadId>,
    Json(req): Json<ThreadActivityRequest>,
) -> Result<Json<ApiResponse<AffectedResponse>>, ApiError> {
    let affected = state
        .subscriptions
        .notify_new_activity(thread, req.poster)
        .await?;
    Ok(Json(ApiResponse::ok(AffectedResponse { affected })))
}

/// DELETE /api/threads/{thread_id}
///
/// Removes every subscription of a deleted thread.
pub async fn deleted(
    State(state): State<AppState>,
    Path(thread): Path<ThreadId>,
) -> Result<Json<ApiResponse<AffectedResponse>>, ApiError> {
    let affected = state.subscriptions.purge_thread(thread).await?;
    Ok(Json(ApiResponse::ok(AffectedResponse { affected })))
}

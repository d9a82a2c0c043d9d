//! Subscription handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use agora_core::types::id::ThreadId;
use agora_core::types::pagination::PageResponse;
use agora_entity::subscription::{BatchRemoval, SubscriptionRecord};

use crate::dto::request::UnsubscribeRequest;
use crate::dto::response::{ApiResponse, HasUnseenResponse};
use crate::error::ApiError;
use crate::extractors::{PaginationParams, RequesterIdentity};
use crate::state::AppState;

/// POST /api/subscriptions/{thread_id}
pub async fn subscribe(
    State(state): State<AppState>,
    identity: RequesterIdentity,
    Path(thread): Path<ThreadId>,
) -> Result<(StatusCode, Json<ApiResponse<SubscriptionRecord>>), ApiError> {
    let user = identity.require_user()?;
    let record = state.subscriptions.subscribe(user, thread).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// DELETE /api/subscriptions
///
/// Batch removal of the threads selected in the subscriptions view.
/// Always reports per-id outcomes rather than failing wholesale.
pub async fn unsubscribe(
    State(state): State<AppState>,
    identity: RequesterIdentity,
    Json(req): Json<UnsubscribeRequest>,
) -> Result<Json<ApiResponse<BatchRemoval>>, ApiError> {
    let user = identity.require_user()?;
    let report = state.subscriptions.unsubscribe(user, &req.thread_ids).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// POST /api/subscriptions/{thread_id}/seen
pub async fn mark_seen(
    State(state): State<AppState>,
    identity: RequesterIdentity,
    Path(thread): Path<ThreadId>,
) -> Result<StatusCode, ApiError> {
    let user = identity.require_user()?;
    state.subscriptions.mark_seen(user, thread).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/subscriptions/{thread_id}/unseen
pub async fn mark_unseen(
    State(state): State<AppState>,
    identity: RequesterIdentity,
    Path(thread): Path<ThreadId>,
) -> Result<StatusCode, ApiError> {
    let user = identity.require_user()?;
    state.subscriptions.mark_unseen(user, thread).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/subscriptions
pub async fn list(
    State(state): State<AppState>,
    identity: RequesterIdentity,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<SubscriptionRecord>>>, ApiError> {
    let user = identity.require_user()?;
    let page = state
        .subscriptions
        .subscriptions(user, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/subscriptions/unseen
///
/// The cheap per-request check behind the "new activity" badge.
pub async fn has_unseen(
    State(state): State<AppState>,
    identity: RequesterIdentity,
) -> Result<Json<ApiResponse<HasUnseenResponse>>, ApiError> {
    let user = identity.require_user()?;
    let has_unseen = state.subscriptions.has_unseen(user).await?;
    Ok(Json(ApiResponse::ok(HasUnseenResponse { has_unseen })))
}

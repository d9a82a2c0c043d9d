//! Presence handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use agora_service::PresenceSnapshot;

use crate::dto::request::{HeartbeatRequest, PresenceParams};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::RequesterIdentity;
use crate::state::AppState;

/// POST /api/presence/heartbeat
///
/// Called by the request pipeline on every page render.
pub async fn heartbeat(
    State(state): State<AppState>,
    identity: RequesterIdentity,
    Json(req): Json<HeartbeatRequest>,
) -> Result<StatusCode, ApiError> {
    state.presence.heartbeat(&identity, &req.section).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/presence?section=...
pub async fn snapshot(
    State(state): State<AppState>,
    identity: RequesterIdentity,
    Query(params): Query<PresenceParams>,
) -> Result<Json<ApiResponse<PresenceSnapshot>>, ApiError> {
    let snapshot = state.presence.snapshot(&identity, &params.section).await?;
    Ok(Json(ApiResponse::ok(snapshot)))
}

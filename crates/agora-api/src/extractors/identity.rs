//! `RequesterIdentity` extractor: builds the request context from the
//! identity headers set by the authenticating front end.
//!
//! Authentication itself is a collaborator concern; this engine trusts
//! the headers:
//!
//! - `x-agora-user`: user UUID when authenticated
//! - `x-agora-anonymous`: `1`/`true` when the user browses anonymously
//! - `x-agora-session`: browsing session UUID, required for guests

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use agora_core::error::AppError;
use agora_core::traits::directory::IdentityDirectory;
use agora_core::types::id::{SessionId, UserId};
use agora_service::context::{RequestContext, Requester};

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted requester context available in handlers.
#[derive(Debug, Clone)]
pub struct RequesterIdentity(pub RequestContext);

impl std::ops::Deref for RequesterIdentity {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

fn flag(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

impl FromRequestParts<AppState> for RequesterIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let requester = match header(parts, "x-agora-user") {
            Some(raw) => {
                let user: UserId = raw.parse().map_err(|_| {
                    ApiError(AppError::validation(format!("Invalid x-agora-user: '{raw}'")))
                })?;

                if flag(header(parts, "x-agora-anonymous")) {
                    Requester::Anonymous { user }
                } else {
                    let tag = state
                        .directory
                        .display_tag(user)
                        .await
                        .map_err(ApiError)?
                        .unwrap_or_else(|| user.to_string());
                    Requester::Named { user, tag }
                }
            }
            None => {
                let raw = header(parts, "x-agora-session").ok_or_else(|| {
                    ApiError(AppError::validation(
                        "Missing identity headers: expected x-agora-user or x-agora-session",
                    ))
                })?;
                let session: SessionId = raw.parse().map_err(|_| {
                    ApiError(AppError::validation(format!(
                        "Invalid x-agora-session: '{raw}'"
                    )))
                })?;
                Requester::Guest { session }
            }
        };

        Ok(RequesterIdentity(RequestContext::new(requester)))
    }
}

/// Helper for endpoints that require an authenticated user.
impl RequesterIdentity {
    /// The authenticated user id, or a not-found style validation error
    /// for guests.
    pub fn require_user(&self) -> Result<UserId, ApiError> {
        self.0.requester.user_id().ok_or_else(|| {
            ApiError(AppError::validation(
                "This operation requires an authenticated user",
            ))
        })
    }
}

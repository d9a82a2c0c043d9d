//! Response body DTOs.

use serde::{Deserialize, Serialize};

/// Generic success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` for this envelope; errors use `ApiErrorResponse`.
    pub success: bool,
    /// The payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response of `GET /api/subscriptions/unseen`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HasUnseenResponse {
    /// Whether any subscription has unseen activity.
    pub has_unseen: bool,
}

/// Response of the thread collaborator endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffectedResponse {
    /// Number of subscriptions affected.
    pub affected: u64,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Cache backend reachability.
    pub cache: bool,
}

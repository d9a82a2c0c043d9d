//! Request context carrying the requester's identity class and clock.
//!
//! The original system read "current user" and "current request" from
//! process-wide globals; here the context is an explicit value built by
//! the request pipeline and passed into every service call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_core::types::id::{SessionId, UserId};
use agora_entity::activity::ActivitySubject;

/// The identity class of the current requester.
///
/// Exactly one class applies, and the presence aggregator must reflect
/// the requester exactly once across the named/anonymous/guest buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requester {
    /// Authenticated, browsing under their own name. The tag is the
    /// requester's own display tag, resolved by the identity
    /// collaborator at the edge.
    Named { user: UserId, tag: String },
    /// Authenticated with the browse-anonymously flag set.
    Anonymous { user: UserId },
    /// Unauthenticated visitor.
    Guest { session: SessionId },
}

impl Requester {
    /// The user id, for authenticated requesters.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Named { user, .. } | Self::Anonymous { user } => Some(*user),
            Self::Guest { .. } => None,
        }
    }

    /// The heartbeat subject corresponding to this requester.
    pub fn subject(&self) -> ActivitySubject {
        match self {
            Self::Named { user, .. } => ActivitySubject::Named { user: *user },
            Self::Anonymous { user } => ActivitySubject::Anonymous { user: *user },
            Self::Guest { session } => ActivitySubject::Guest { session: *session },
        }
    }
}

/// Context for the current request.
///
/// Built by the request pipeline and passed into service methods so that
/// every operation knows *who* is acting and *when* the request arrived.
/// Presence liveness is computed against `request_time`, never against a
/// clock read inside the aggregator, which keeps reads reproducible in
/// tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The requester's identity class.
    pub requester: Requester,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Create a context for a request received now.
    pub fn new(requester: Requester) -> Self {
        Self {
            requester,
            request_time: Utc::now(),
        }
    }

    /// Create a context with an explicit clock, for tests and replays.
    pub fn at(requester: Requester, request_time: DateTime<Utc>) -> Self {
        Self {
            requester,
            request_time,
        }
    }
}

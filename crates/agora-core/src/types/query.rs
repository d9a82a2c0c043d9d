//! Typed query parameters for presence reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{SessionId, UserId};

/// Parameters for a single presence query against the activity store.
///
/// The original system composed these as ad-hoc query condition arrays;
/// here they are an explicit value so every store implementation applies
/// the same window, prefix, and exclusion rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceQuery {
    /// Section prefix to match. A record whose section is
    /// `"forum/3/thread/9"` matches the prefix `"forum/3"`.
    pub section_prefix: String,
    /// Lower bound of the trailing window. Records observed before this
    /// instant are stale and excluded.
    pub window_start: DateTime<Utc>,
    /// Authenticated user to exclude from the result, if any. Used to
    /// keep the requester out of their own "others viewing" listing.
    pub exclude_user: Option<UserId>,
    /// Guest session to exclude from the result, if any. The guest
    /// analog of `exclude_user`.
    pub exclude_session: Option<SessionId>,
}

impl PresenceQuery {
    /// Build a query for the given prefix and window start.
    pub fn new(section_prefix: impl Into<String>, window_start: DateTime<Utc>) -> Self {
        Self {
            section_prefix: section_prefix.into(),
            window_start,
            exclude_user: None,
            exclude_session: None,
        }
    }

    /// Exclude an authenticated user from the results.
    pub fn excluding(mut self, user: UserId) -> Self {
        self.exclude_user = Some(user);
        self
    }

    /// Exclude a guest session from the results.
    pub fn excluding_session(mut self, session: SessionId) -> Self {
        self.exclude_session = Some(session);
        self
    }
}

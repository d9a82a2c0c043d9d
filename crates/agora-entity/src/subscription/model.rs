//! Subscription record model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use agora_core::AppError;
use agora_core::types::id::{ThreadId, UserId};

/// Whether the subscriber has viewed content posted since their last visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "seen_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SeenState {
    /// The subscriber is up to date with the thread.
    Seen,
    /// New content has appeared since the subscriber's last visit.
    Unseen,
}

impl SeenState {
    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seen => "seen",
            Self::Unseen => "unseen",
        }
    }
}

impl fmt::Display for SeenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SeenState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seen" => Ok(Self::Seen),
            "unseen" => Ok(Self::Unseen),
            _ => Err(AppError::validation(format!(
                "Invalid seen state: '{s}'. Expected 'seen' or 'unseen'"
            ))),
        }
    }
}

/// A user's subscription to a thread.
///
/// At most one record exists per (user, thread) pair. Created in the
/// `Seen` state; flipped `Unseen` by new thread activity from anyone but
/// the subscriber; flipped back `Seen` on an explicit mark or a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SubscriptionRecord {
    /// Owning user.
    #[sqlx(rename = "user_id")]
    pub user: UserId,
    /// Subscribed thread.
    #[sqlx(rename = "thread_id")]
    pub thread: ThreadId,
    /// Seen/unseen state.
    pub state: SeenState,
    /// When the subscription was created.
    pub created_at: DateTime<Utc>,
    /// When the state last changed.
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionRecord {
    /// Build a fresh subscription in the `Seen` state.
    pub fn new(user: UserId, thread: ThreadId, now: DateTime<Utc>) -> Self {
        Self {
            user,
            thread,
            state: SeenState::Seen,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the thread has unseen activity for this subscriber.
    pub fn is_unseen(&self) -> bool {
        self.state == SeenState::Unseen
    }
}

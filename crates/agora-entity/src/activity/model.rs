//! Activity record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_core::types::id::{SessionId, UserId};

/// Who produced a heartbeat. Exactly one class applies per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivitySubject {
    /// Authenticated user browsing under their own name.
    Named { user: UserId },
    /// Authenticated user with the browse-anonymously flag set. Counted,
    /// never listed by name.
    Anonymous { user: UserId },
    /// Unauthenticated visitor, identified only by browsing session.
    Guest { session: SessionId },
}

impl ActivitySubject {
    /// The upsert identity of this subject. Authenticated subjects key by
    /// user id so that toggling anonymity rewrites the same record;
    /// guests key by session id.
    pub fn key(&self) -> SubjectKey {
        match self {
            Self::Named { user } | Self::Anonymous { user } => SubjectKey::User(*user),
            Self::Guest { session } => SubjectKey::Session(*session),
        }
    }

    /// The user id, for authenticated subjects.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Named { user } | Self::Anonymous { user } => Some(*user),
            Self::Guest { .. } => None,
        }
    }

    /// Whether the subject is authenticated but browsing anonymously.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous { .. })
    }

    /// Whether the subject carries no identity at all.
    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest { .. })
    }
}

/// Key under which a subject's single live record is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKey {
    /// Authenticated subject, named or anonymous.
    User(UserId),
    /// Guest subject.
    Session(SessionId),
}

/// A single heartbeat record: who was where, and when last seen.
///
/// There is at most one live record per [`SubjectKey`]; a new heartbeat
/// from the same subject overwrites `section` and `observed_at`. A record
/// becomes stale once `observed_at` falls outside the trailing presence
/// window; stale rows may be purged but staleness itself is a pure time
/// comparison at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// The subject that produced the heartbeat.
    pub subject: ActivitySubject,
    /// Path-like identifier of the forum area visited, e.g.
    /// `"forum/3/thread/9"`.
    pub section: String,
    /// Timestamp of the most recent heartbeat.
    pub observed_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Build a record for a heartbeat observed now.
    pub fn new(
        subject: ActivitySubject,
        section: impl Into<String>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject,
            section: section.into(),
            observed_at,
        }
    }

    /// Whether this record is live relative to the given window start.
    pub fn is_live(&self, window_start: DateTime<Utc>) -> bool {
        self.observed_at >= window_start
    }
}

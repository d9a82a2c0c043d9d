//! Cache key builders for all Agora cache entries.
//!
//! Centralising key construction prevents typos and makes it easy to
//! find every key the application uses. Every code path that mutates a
//! user's subscriptions must invalidate [`unseen_subscriptions`] for
//! that user in the same logical transaction.

use agora_core::types::id::UserId;

/// Prefix applied to all Agora cache keys.
const PREFIX: &str = "agora";

/// Cache key for the "does this user have unseen subscriptions" flag.
pub fn unseen_subscriptions(user: UserId) -> String {
    format!("{PREFIX}:subs:unseen:{user}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_unseen_key_shape() {
        let user = UserId::from_uuid(Uuid::nil());
        assert_eq!(
            unseen_subscriptions(user),
            "agora:subs:unseen:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_keys_are_distinct_per_user() {
        assert_ne!(
            unseen_subscriptions(UserId::new()),
            unseen_subscriptions(UserId::new())
        );
    }
}

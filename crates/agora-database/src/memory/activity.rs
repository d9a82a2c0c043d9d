//! In-memory heartbeat store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use agora_core::result::AppResult;
use agora_core::types::id::UserId;
use agora_core::types::query::PresenceQuery;
use agora_entity::activity::{ActivityRecord, ActivityStore, ActivitySubject, SubjectKey};

/// Dashmap-backed activity store. One entry per subject key; upserts
/// replace the entry wholesale, which gives the same last-write-wins
/// behavior as the SQL `ON CONFLICT` path.
#[derive(Debug, Default)]
pub struct MemoryActivityStore {
    records: DashMap<SubjectKey, ActivityRecord>,
}

impl MemoryActivityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(record: &ActivityRecord, query: &PresenceQuery) -> bool {
        record.is_live(query.window_start) && record.section.starts_with(&query.section_prefix)
    }
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn upsert(&self, record: ActivityRecord) -> AppResult<()> {
        self.records.insert(record.subject.key(), record);
        Ok(())
    }

    async fn named_viewers(&self, query: &PresenceQuery) -> AppResult<Vec<UserId>> {
        let mut live: Vec<(DateTime<Utc>, UserId)> = self
            .records
            .iter()
            .filter(|entry| Self::matches(entry.value(), query))
            .filter_map(|entry| match entry.value().subject {
                ActivitySubject::Named { user } if Some(user) != query.exclude_user => {
                    Some((entry.value().observed_at, user))
                }
                _ => None,
            })
            .collect();

        live.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(live.into_iter().map(|(_, user)| user).collect())
    }

    async fn anonymous_count(&self, query: &PresenceQuery) -> AppResult<u64> {
        let count = self
            .records
            .iter()
            .filter(|entry| {
                let record = entry.value();
                record.subject.is_anonymous()
                    && record.subject.user_id() != query.exclude_user
                    && Self::matches(record, query)
            })
            .count();
        Ok(count as u64)
    }

    async fn guest_count(&self, query: &PresenceQuery) -> AppResult<u64> {
        let count = self
            .records
            .iter()
            .filter(|entry| {
                let record = entry.value();
                match record.subject {
                    ActivitySubject::Guest { session } => {
                        Some(session) != query.exclude_session && Self::matches(record, query)
                    }
                    _ => false,
                }
            })
            .count();
        Ok(count as u64)
    }

    async fn purge_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let before = self.records.len();
        self.records.retain(|_, record| record.observed_at >= cutoff);
        Ok((before - self.records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::types::id::SessionId;
    use chrono::TimeDelta;

    fn named(user: UserId, section: &str, observed_at: DateTime<Utc>) -> ActivityRecord {
        ActivityRecord::new(ActivitySubject::Named { user }, section, observed_at)
    }

    #[tokio::test]
    async fn test_heartbeat_overwrites_previous_section() {
        let store = MemoryActivityStore::new();
        let user = UserId::new();
        let now = Utc::now();

        store.upsert(named(user, "forum/1", now)).await.unwrap();
        store.upsert(named(user, "forum/2", now)).await.unwrap();

        let query = PresenceQuery::new("forum/1", now - TimeDelta::seconds(300));
        assert!(store.named_viewers(&query).await.unwrap().is_empty());

        let query = PresenceQuery::new("forum/2", now - TimeDelta::seconds(300));
        assert_eq!(store.named_viewers(&query).await.unwrap(), vec![user]);
    }

    #[tokio::test]
    async fn test_prefix_matching() {
        let store = MemoryActivityStore::new();
        let user = UserId::new();
        let now = Utc::now();

        store
            .upsert(named(user, "forum/3/thread/9", now))
            .await
            .unwrap();

        let window_start = now - TimeDelta::seconds(300);
        let hit = PresenceQuery::new("forum/3", window_start);
        let miss = PresenceQuery::new("forum/4", window_start);
        assert_eq!(store.named_viewers(&hit).await.unwrap(), vec![user]);
        assert!(store.named_viewers(&miss).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_records_excluded_from_all_reads() {
        let store = MemoryActivityStore::new();
        let now = Utc::now();
        let stale = now - TimeDelta::seconds(301);

        store.upsert(named(UserId::new(), "forum/1", stale)).await.unwrap();
        store
            .upsert(ActivityRecord::new(
                ActivitySubject::Anonymous { user: UserId::new() },
                "forum/1",
                stale,
            ))
            .await
            .unwrap();
        store
            .upsert(ActivityRecord::new(
                ActivitySubject::Guest {
                    session: SessionId::new(),
                },
                "forum/1",
                stale,
            ))
            .await
            .unwrap();

        let query = PresenceQuery::new("forum/1", now - TimeDelta::seconds(300));
        assert!(store.named_viewers(&query).await.unwrap().is_empty());
        assert_eq!(store.anonymous_count(&query).await.unwrap(), 0);
        assert_eq!(store.guest_count(&query).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_excluded_user_never_listed() {
        let store = MemoryActivityStore::new();
        let me = UserId::new();
        let other = UserId::new();
        let now = Utc::now();

        store.upsert(named(me, "forum/1", now)).await.unwrap();
        store.upsert(named(other, "forum/1", now)).await.unwrap();

        let query = PresenceQuery::new("forum/1", now - TimeDelta::seconds(300)).excluding(me);
        assert_eq!(store.named_viewers(&query).await.unwrap(), vec![other]);
    }

    #[tokio::test]
    async fn test_anonymous_records_counted_not_listed() {
        let store = MemoryActivityStore::new();
        let now = Utc::now();

        store
            .upsert(ActivityRecord::new(
                ActivitySubject::Anonymous { user: UserId::new() },
                "forum/1",
                now,
            ))
            .await
            .unwrap();

        let query = PresenceQuery::new("forum/1", now - TimeDelta::seconds(300));
        assert!(store.named_viewers(&query).await.unwrap().is_empty());
        assert_eq!(store.anonymous_count(&query).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_viewers_ordered_by_recency() {
        let store = MemoryActivityStore::new();
        let older = UserId::new();
        let newer = UserId::new();
        let now = Utc::now();

        store
            .upsert(named(older, "forum/1", now - TimeDelta::seconds(60)))
            .await
            .unwrap();
        store.upsert(named(newer, "forum/1", now)).await.unwrap();

        let query = PresenceQuery::new("forum/1", now - TimeDelta::seconds(300));
        assert_eq!(store.named_viewers(&query).await.unwrap(), vec![newer, older]);
    }

    #[tokio::test]
    async fn test_purge_removes_only_stale_rows() {
        let store = MemoryActivityStore::new();
        let now = Utc::now();

        store.upsert(named(UserId::new(), "forum/1", now)).await.unwrap();
        store
            .upsert(named(UserId::new(), "forum/1", now - TimeDelta::seconds(7200)))
            .await
            .unwrap();

        let removed = store
            .purge_stale(now - TimeDelta::seconds(3600))
            .await
            .unwrap();
        assert_eq!(removed, 1);

        let query = PresenceQuery::new("forum/1", now - TimeDelta::seconds(300));
        assert_eq!(store.named_viewers(&query).await.unwrap().len(), 1);
    }
}

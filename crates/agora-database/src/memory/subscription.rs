//! In-memory subscription store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use agora_core::result::AppResult;
use agora_core::types::id::{ThreadId, UserId};
use agora_core::types::pagination::{PageRequest, PageResponse};
use agora_entity::subscription::{SeenState, SubscriptionRecord, SubscriptionStore};

/// Dashmap-backed subscription store keyed by (user, thread).
#[derive(Debug, Default)]
pub struct MemorySubscriptionStore {
    records: DashMap<(UserId, ThreadId), SubscriptionRecord>,
}

impl MemorySubscriptionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionStore for MemorySubscriptionStore {
    async fn find(&self, user: UserId, thread: ThreadId) -> AppResult<Option<SubscriptionRecord>> {
        Ok(self.records.get(&(user, thread)).map(|r| r.clone()))
    }

    async fn insert(&self, record: &SubscriptionRecord) -> AppResult<bool> {
        let key = (record.user, record.thread);
        // Entry API keeps check-then-insert atomic per shard.
        match self.records.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Ok(false),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(true)
            }
        }
    }

    async fn set_state(&self, user: UserId, thread: ThreadId, state: SeenState) -> AppResult<bool> {
        match self.records.get_mut(&(user, thread)) {
            Some(mut record) => {
                record.state = state;
                record.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, user: UserId, thread: ThreadId) -> AppResult<bool> {
        Ok(self.records.remove(&(user, thread)).is_some())
    }

    async fn mark_unseen_for_thread(
        &self,
        thread: ThreadId,
        exclude: Option<UserId>,
    ) -> AppResult<Vec<UserId>> {
        let mut affected = Vec::new();
        for mut entry in self.records.iter_mut() {
            let record = entry.value_mut();
            if record.thread == thread
                && record.state == SeenState::Seen
                && Some(record.user) != exclude
            {
                record.state = SeenState::Unseen;
                record.updated_at = Utc::now();
                affected.push(record.user);
            }
        }
        Ok(affected)
    }

    async fn remove_thread(&self, thread: ThreadId) -> AppResult<Vec<UserId>> {
        let keys: Vec<(UserId, ThreadId)> = self
            .records
            .iter()
            .filter(|entry| entry.value().thread == thread)
            .map(|entry| *entry.key())
            .collect();

        let mut affected = Vec::with_capacity(keys.len());
        for key in keys {
            if self.records.remove(&key).is_some() {
                affected.push(key.0);
            }
        }
        Ok(affected)
    }

    async fn find_by_user(
        &self,
        user: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SubscriptionRecord>> {
        let mut mine: Vec<SubscriptionRecord> = self
            .records
            .iter()
            .filter(|entry| entry.value().user == user)
            .map(|entry| entry.value().clone())
            .collect();

        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = mine.len() as u64;
        let items: Vec<SubscriptionRecord> = mine
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn has_unseen(&self, user: UserId) -> AppResult<bool> {
        Ok(self
            .records
            .iter()
            .any(|entry| entry.value().user == user && entry.value().is_unseen()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_rejects_duplicate_pair() {
        let store = MemorySubscriptionStore::new();
        let record = SubscriptionRecord::new(UserId::new(), ThreadId::new(), Utc::now());

        assert!(store.insert(&record).await.unwrap());
        assert!(!store.insert(&record).await.unwrap());

        let found = store.find(record.user, record.thread).await.unwrap().unwrap();
        assert_eq!(found.state, SeenState::Seen);
    }

    #[tokio::test]
    async fn test_set_state_on_missing_record_reports_absence() {
        let store = MemorySubscriptionStore::new();
        let updated = store
            .set_state(UserId::new(), ThreadId::new(), SeenState::Unseen)
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_mark_unseen_spares_the_excluded_poster() {
        let store = MemorySubscriptionStore::new();
        let thread = ThreadId::new();
        let poster = UserId::new();
        let watcher = UserId::new();
        let now = Utc::now();

        store
            .insert(&SubscriptionRecord::new(poster, thread, now))
            .await
            .unwrap();
        store
            .insert(&SubscriptionRecord::new(watcher, thread, now))
            .await
            .unwrap();

        let affected = store
            .mark_unseen_for_thread(thread, Some(poster))
            .await
            .unwrap();
        assert_eq!(affected, vec![watcher]);

        let poster_record = store.find(poster, thread).await.unwrap().unwrap();
        assert_eq!(poster_record.state, SeenState::Seen);
        assert!(store.has_unseen(watcher).await.unwrap());
        assert!(!store.has_unseen(poster).await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_unseen_skips_already_unseen_records() {
        let store = MemorySubscriptionStore::new();
        let thread = ThreadId::new();
        let watcher = UserId::new();

        store
            .insert(&SubscriptionRecord::new(watcher, thread, Utc::now()))
            .await
            .unwrap();
        store
            .set_state(watcher, thread, SeenState::Unseen)
            .await
            .unwrap();

        let affected = store.mark_unseen_for_thread(thread, None).await.unwrap();
        assert!(affected.is_empty());
    }

    #[tokio::test]
    async fn test_remove_thread_returns_affected_users() {
        let store = MemorySubscriptionStore::new();
        let thread = ThreadId::new();
        let a = UserId::new();
        let b = UserId::new();
        let now = Utc::now();

        store.insert(&SubscriptionRecord::new(a, thread, now)).await.unwrap();
        store.insert(&SubscriptionRecord::new(b, thread, now)).await.unwrap();
        store
            .insert(&SubscriptionRecord::new(a, ThreadId::new(), now))
            .await
            .unwrap();

        let mut affected = store.remove_thread(thread).await.unwrap();
        affected.sort_by_key(|u| u.to_string());
        let mut expected = vec![a, b];
        expected.sort_by_key(|u| u.to_string());
        assert_eq!(affected, expected);

        assert!(store.find(a, thread).await.unwrap().is_none());
        // The unrelated subscription survives.
        let page = store.find_by_user(a, &PageRequest::default()).await.unwrap();
        assert_eq!(page.total_items, 1);
    }

    #[tokio::test]
    async fn test_find_by_user_paginates_newest_first() {
        let store = MemorySubscriptionStore::new();
        let user = UserId::new();
        let base = Utc::now();

        for i in 0..5 {
            let record = SubscriptionRecord::new(
                user,
                ThreadId::new(),
                base + chrono::TimeDelta::seconds(i),
            );
            store.insert(&record).await.unwrap();
        }

        let page = store
            .find_by_user(user, &PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);
        assert!(page.items[0].created_at > page.items[1].created_at);
    }
}

//! Subscription repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use agora_core::error::{AppError, ErrorKind};
use agora_core::result::AppResult;
use agora_core::types::id::{ThreadId, UserId};
use agora_core::types::pagination::{PageRequest, PageResponse};
use agora_entity::subscription::{SeenState, SubscriptionRecord, SubscriptionStore};

/// PostgreSQL-backed subscription store.
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    /// Create a new subscription repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for SubscriptionRepository {
    async fn find(&self, user: UserId, thread: ThreadId) -> AppResult<Option<SubscriptionRecord>> {
        sqlx::query_as::<_, SubscriptionRecord>(
            "SELECT user_id, thread_id, state, created_at, updated_at \
             FROM subscriptions WHERE user_id = $1 AND thread_id = $2",
        )
        .bind(user)
        .bind(thread)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch subscription", e))
    }

    async fn insert(&self, record: &SubscriptionRecord) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO subscriptions (user_id, thread_id, state, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, thread_id) DO NOTHING",
        )
        .bind(record.user)
        .bind(record.thread)
        .bind(record.state)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert subscription", e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_state(&self, user: UserId, thread: ThreadId, state: SeenState) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE subscriptions SET state = $3, updated_at = $4 \
             WHERE user_id = $1 AND thread_id = $2",
        )
        .bind(user)
        .bind(thread)
        .bind(state)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update subscription state", e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove(&self, user: UserId, thread: ThreadId) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM subscriptions WHERE user_id = $1 AND thread_id = $2")
                .bind(user)
                .bind(thread)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete subscription", e)
                })?;

        Ok(result.rows_affected() == 1)
    }

    async fn mark_unseen_for_thread(
        &self,
        thread: ThreadId,
        exclude: Option<UserId>,
    ) -> AppResult<Vec<UserId>> {
        let exclude: Option<Uuid> = exclude.map(UserId::into_uuid);

        let affected: Vec<Uuid> = sqlx::query_scalar(
            "UPDATE subscriptions SET state = 'unseen', updated_at = $3 \
             WHERE thread_id = $1 AND state = 'seen' \
               AND ($2::uuid IS NULL OR user_id <> $2) \
             RETURNING user_id",
        )
        .bind(thread)
        .bind(exclude)
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark thread unseen", e)
        })?;

        Ok(affected.into_iter().map(UserId::from_uuid).collect())
    }

    async fn remove_thread(&self, thread: ThreadId) -> AppResult<Vec<UserId>> {
        let affected: Vec<Uuid> =
            sqlx::query_scalar("DELETE FROM subscriptions WHERE thread_id = $1 RETURNING user_id")
                .bind(thread)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to delete thread subscriptions",
                        e,
                    )
                })?;

        Ok(affected.into_iter().map(UserId::from_uuid).collect())
    }

    async fn find_by_user(
        &self,
        user: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SubscriptionRecord>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE user_id = $1")
            .bind(user)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count subscriptions", e)
            })?;

        let records = sqlx::query_as::<_, SubscriptionRecord>(
            "SELECT user_id, thread_id, state, created_at, updated_at \
             FROM subscriptions WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list subscriptions", e)
        })?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn has_unseen(&self, user: UserId) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM subscriptions WHERE user_id = $1 AND state = 'unseen')",
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check unseen subscriptions", e)
        })
    }
}

//! Activity repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use agora_core::error::{AppError, ErrorKind};
use agora_core::result::AppResult;
use agora_core::types::id::{SessionId, UserId};
use agora_core::types::query::PresenceQuery;
use agora_entity::activity::{ActivityRecord, ActivityStore, SubjectKey};

use super::escape_like;

/// PostgreSQL-backed heartbeat store.
///
/// Rows are keyed by `subject_key` (user id for authenticated subjects,
/// session id for guests); the upsert relies on `ON CONFLICT` for
/// last-write-wins semantics under concurrent heartbeats.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn like_pattern(prefix: &str) -> String {
    format!("{}%", escape_like(prefix))
}

#[async_trait]
impl ActivityStore for ActivityRepository {
    async fn upsert(&self, record: ActivityRecord) -> AppResult<()> {
        let subject_key: Uuid = match record.subject.key() {
            SubjectKey::User(user) => user.into_uuid(),
            SubjectKey::Session(session) => session.into_uuid(),
        };
        let user_id: Option<Uuid> = record.subject.user_id().map(UserId::into_uuid);

        sqlx::query(
            "INSERT INTO activity_records (subject_key, user_id, anonymous, section, observed_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (subject_key) DO UPDATE \
             SET user_id = EXCLUDED.user_id, anonymous = EXCLUDED.anonymous, \
                 section = EXCLUDED.section, observed_at = EXCLUDED.observed_at",
        )
        .bind(subject_key)
        .bind(user_id)
        .bind(record.subject.is_anonymous())
        .bind(&record.section)
        .bind(record.observed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert activity record", e)
        })?;

        Ok(())
    }

    async fn named_viewers(&self, query: &PresenceQuery) -> AppResult<Vec<UserId>> {
        let exclude: Option<Uuid> = query.exclude_user.map(UserId::into_uuid);

        let rows: Vec<Uuid> = sqlx::query_scalar(
            "SELECT user_id FROM activity_records \
             WHERE user_id IS NOT NULL AND anonymous = FALSE \
               AND section LIKE $1 AND observed_at >= $2 \
               AND ($3::uuid IS NULL OR user_id <> $3) \
             ORDER BY observed_at DESC",
        )
        .bind(like_pattern(&query.section_prefix))
        .bind(query.window_start)
        .bind(exclude)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list named viewers", e)
        })?;

        Ok(rows.into_iter().map(UserId::from_uuid).collect())
    }

    async fn anonymous_count(&self, query: &PresenceQuery) -> AppResult<u64> {
        let exclude: Option<Uuid> = query.exclude_user.map(UserId::into_uuid);

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM activity_records \
             WHERE user_id IS NOT NULL AND anonymous = TRUE \
               AND section LIKE $1 AND observed_at >= $2 \
               AND ($3::uuid IS NULL OR user_id <> $3)",
        )
        .bind(like_pattern(&query.section_prefix))
        .bind(query.window_start)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count anonymous viewers", e)
        })?;

        Ok(count as u64)
    }

    async fn guest_count(&self, query: &PresenceQuery) -> AppResult<u64> {
        let exclude: Option<Uuid> = query.exclude_session.map(SessionId::into_uuid);

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM activity_records \
             WHERE user_id IS NULL \
               AND section LIKE $1 AND observed_at >= $2 \
               AND ($3::uuid IS NULL OR subject_key <> $3)",
        )
        .bind(like_pattern(&query.section_prefix))
        .bind(query.window_start)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count guest viewers", e)
        })?;

        Ok(count as u64)
    }

    async fn purge_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM activity_records WHERE observed_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge stale activity", e)
            })?;

        Ok(result.rows_affected())
    }
}

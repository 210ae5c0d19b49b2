//! Notification read-watermark repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use capture_core::error::{AppError, ErrorKind};
use capture_core::result::AppResult;
use capture_entity::notification::watermark::ReadWatermark;

/// Repository for the per-user notification read watermark.
#[derive(Debug, Clone)]
pub struct WatermarkRepository {
    pool: PgPool,
}

impl WatermarkRepository {
    /// Create a new watermark repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The user's current watermark, if one has ever been set.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<ReadWatermark>> {
        sqlx::query_as::<_, ReadWatermark>(
            "SELECT * FROM notification_watermarks WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find watermark", e))
    }

    /// Advance the user's watermark to the given instant.
    ///
    /// The GREATEST guard keeps a stale write from moving the watermark
    /// backwards and un-reading items.
    pub async fn advance(
        &self,
        user_id: Uuid,
        read_up_to: DateTime<Utc>,
    ) -> AppResult<ReadWatermark> {
        sqlx::query_as::<_, ReadWatermark>(
            "INSERT INTO notification_watermarks (user_id, last_read_at) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE \
                 SET last_read_at = GREATEST(notification_watermarks.last_read_at, EXCLUDED.last_read_at) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(read_up_to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to advance watermark", e))
    }
}

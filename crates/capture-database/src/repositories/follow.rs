//! Follow relationship repository.

use sqlx::PgPool;
use uuid::Uuid;

use capture_core::error::{AppError, ErrorKind};
use capture_core::result::AppResult;
use capture_entity::user::User;

/// Repository for follow edges between users.
#[derive(Debug, Clone)]
pub struct FollowRepository {
    pool: PgPool,
}

impl FollowRepository {
    /// Create a new follow repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a follow edge. Idempotent: re-following is a no-op.
    pub async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO follows (follower_id, followee_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert follow", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a follow edge. Idempotent.
    pub async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
                .bind(follower_id)
                .bind(followee_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete follow", e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether `follower_id` follows `followee_id`.
    pub async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followee_id = $2)",
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check follow", e))
    }

    /// Users who follow the given user.
    pub async fn followers_of(&self, user_id: Uuid) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u \
             JOIN follows f ON f.follower_id = u.id \
             WHERE f.followee_id = $1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list followers", e))
    }

    /// Users the given user follows.
    pub async fn followees_of(&self, user_id: Uuid) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u \
             JOIN follows f ON f.followee_id = u.id \
             WHERE f.follower_id = $1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list followees", e))
    }

    /// Follower / followee counts for a profile page.
    pub async fn counts_for(&self, user_id: Uuid) -> AppResult<(i64, i64)> {
        let row: (i64, i64) = sqlx::query_as(
            "SELECT \
               (SELECT COUNT(*) FROM follows WHERE followee_id = $1), \
               (SELECT COUNT(*) FROM follows WHERE follower_id = $1)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count follows", e))?;

        Ok(row)
    }
}

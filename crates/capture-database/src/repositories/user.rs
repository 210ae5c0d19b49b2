//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use capture_core::error::{AppError, ErrorKind};
use capture_core::result::AppResult;
use capture_entity::user::model::{CreateUser, UpdateProfile};
use capture_entity::user::User;

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Fetch several users by ID in one round trip.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch users by ids", e)
            })
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, nickname) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.nickname)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict(format!("Username '{}' already exists", data.username))
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Update a user's profile fields.
    pub async fn update_profile(&self, user_id: Uuid, data: &UpdateProfile) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET nickname = COALESCE($2, nickname), \
                              avatar_url = COALESCE($3, avatar_url), \
                              bio = COALESCE($4, bio), \
                              favorite_sport = COALESCE($5, favorite_sport), \
                              home_lat = COALESCE($6, home_lat), \
                              home_lng = COALESCE($7, home_lng), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(&data.nickname)
        .bind(&data.avatar_url)
        .bind(&data.bio)
        .bind(&data.favorite_sport)
        .bind(data.home_lat)
        .bind(data.home_lng)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Update a user's avatar URL only.
    pub async fn update_avatar(&self, user_id: Uuid, avatar_url: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET avatar_url = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(avatar_url)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update avatar", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Update a user's password hash.
    pub async fn update_password(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Delete a user by ID.
    ///
    /// All owned rows (highlights, likes, comments, meetups, participant
    /// rows, messages, feedback, follows, watermark) go with it via
    /// ON DELETE CASCADE.
    pub async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}

//! Chat message repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use capture_core::error::{AppError, ErrorKind};
use capture_core::result::AppResult;
use capture_entity::message::model::Message;

/// Columns every message query selects; sender nickname is always joined.
const MESSAGE_SELECT: &str = "SELECT m.id, m.sender_id, u.nickname AS sender_nickname, \
       m.meetup_id, m.recipient_id, m.body, m.created_at \
 FROM messages m JOIN users u ON u.id = m.sender_id";

/// Repository for meetup chat and direct messages.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a meetup chat message.
    pub async fn insert_meetup_message(
        &self,
        sender_id: Uuid,
        meetup_id: Uuid,
        body: &str,
    ) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            "WITH inserted AS (\
                 INSERT INTO messages (sender_id, meetup_id, body) \
                 VALUES ($1, $2, $3) RETURNING *\
             ) \
             SELECT i.id, i.sender_id, u.nickname AS sender_nickname, \
                    i.meetup_id, i.recipient_id, i.body, i.created_at \
             FROM inserted i JOIN users u ON u.id = i.sender_id",
        )
        .bind(sender_id)
        .bind(meetup_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert meetup message", e)
        })
    }

    /// Insert a direct message.
    pub async fn insert_direct_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        body: &str,
    ) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            "WITH inserted AS (\
                 INSERT INTO messages (sender_id, recipient_id, body) \
                 VALUES ($1, $2, $3) RETURNING *\
             ) \
             SELECT i.id, i.sender_id, u.nickname AS sender_nickname, \
                    i.meetup_id, i.recipient_id, i.body, i.created_at \
             FROM inserted i JOIN users u ON u.id = i.sender_id",
        )
        .bind(sender_id)
        .bind(recipient_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert direct message", e)
        })
    }

    /// Messages in a meetup thread, oldest first.
    pub async fn meetup_thread(&self, meetup_id: Uuid) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(&format!(
            "{MESSAGE_SELECT} WHERE m.meetup_id = $1 ORDER BY m.created_at ASC"
        ))
        .bind(meetup_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list meetup thread", e))
    }

    /// Direct messages between two users, oldest first.
    pub async fn direct_thread(&self, user_a: Uuid, user_b: Uuid) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(&format!(
            "{MESSAGE_SELECT} \
             WHERE (m.sender_id = $1 AND m.recipient_id = $2) \
                OR (m.sender_id = $2 AND m.recipient_id = $1) \
             ORDER BY m.created_at ASC"
        ))
        .bind(user_a)
        .bind(user_b)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list direct thread", e))
    }

    /// Every direct message the user sent or received, newest first.
    ///
    /// Conversation grouping keeps the first message per partner, so the
    /// descending order here is what makes that the latest one.
    pub async fn direct_messages_of(&self, user_id: Uuid) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(&format!(
            "{MESSAGE_SELECT} \
             WHERE m.recipient_id IS NOT NULL \
               AND (m.sender_id = $1 OR m.recipient_id = $1) \
             ORDER BY m.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list direct messages", e)
        })
    }
}

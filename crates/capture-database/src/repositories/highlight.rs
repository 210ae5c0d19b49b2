//! Highlight repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use capture_core::error::{AppError, ErrorKind};
use capture_core::result::AppResult;
use capture_core::types::pagination::{PageRequest, PageResponse};
use capture_entity::highlight::comment::HighlightComment;
use capture_entity::highlight::model::{Highlight, HighlightCard, MediaKind};
use capture_entity::notification::source::{CommentEvent, LikeEvent};

/// Columns shared by every feed-card query. `$1` is always the viewer.
const CARD_SELECT: &str = "SELECT h.id, h.author_id, u.nickname AS author_nickname, \
       u.avatar_url AS author_avatar_url, h.caption, h.media_url, h.media_kind, h.sport, \
       (SELECT COUNT(*) FROM highlight_likes l WHERE l.highlight_id = h.id) AS like_count, \
       (SELECT COUNT(*) FROM highlight_comments c WHERE c.highlight_id = h.id) AS comment_count, \
       EXISTS(SELECT 1 FROM highlight_likes l WHERE l.highlight_id = h.id AND l.user_id = $1) \
           AS liked_by_viewer, \
       h.created_at \
 FROM highlights h JOIN users u ON u.id = h.author_id";

/// Repository for highlights, likes, and comments.
#[derive(Debug, Clone)]
pub struct HighlightRepository {
    pool: PgPool,
}

impl HighlightRepository {
    /// Create a new highlight repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a highlight by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Highlight>> {
        sqlx::query_as::<_, Highlight>("SELECT * FROM highlights WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find highlight", e))
    }

    /// List the feed as viewer-specific cards, newest first.
    pub async fn feed(
        &self,
        viewer_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HighlightCard>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM highlights")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count highlights", e)
            })?;

        let cards = sqlx::query_as::<_, HighlightCard>(&format!(
            "{CARD_SELECT} ORDER BY h.created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(viewer_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list feed", e))?;

        Ok(PageResponse::new(
            cards,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// A single highlight as a viewer-specific card (permalink view).
    pub async fn card_by_id(
        &self,
        viewer_id: Uuid,
        highlight_id: Uuid,
    ) -> AppResult<Option<HighlightCard>> {
        sqlx::query_as::<_, HighlightCard>(&format!("{CARD_SELECT} WHERE h.id = $2"))
            .bind(viewer_id)
            .bind(highlight_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch highlight card", e)
            })
    }

    /// Cards authored by one user, newest first.
    pub async fn cards_by_author(
        &self,
        viewer_id: Uuid,
        author_id: Uuid,
    ) -> AppResult<Vec<HighlightCard>> {
        sqlx::query_as::<_, HighlightCard>(&format!(
            "{CARD_SELECT} WHERE h.author_id = $2 ORDER BY h.created_at DESC"
        ))
        .bind(viewer_id)
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list author highlights", e)
        })
    }

    /// Insert a new highlight.
    pub async fn create(
        &self,
        author_id: Uuid,
        caption: &str,
        media_url: &str,
        media_kind: MediaKind,
        sport: &str,
    ) -> AppResult<Highlight> {
        sqlx::query_as::<_, Highlight>(
            "INSERT INTO highlights (author_id, caption, media_url, media_kind, sport) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(author_id)
        .bind(caption)
        .bind(media_url)
        .bind(media_kind)
        .bind(sport)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create highlight", e))
    }

    /// Update a highlight's caption.
    pub async fn update_caption(&self, id: Uuid, caption: &str) -> AppResult<Highlight> {
        sqlx::query_as::<_, Highlight>(
            "UPDATE highlights SET caption = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(caption)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update caption", e))?
        .ok_or_else(|| AppError::not_found(format!("Highlight {id} not found")))
    }

    /// Delete a highlight by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM highlights WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete highlight", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert a like. Returns false when the like already existed.
    pub async fn insert_like(&self, highlight_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO highlight_likes (highlight_id, user_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(highlight_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert like", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a like. Returns false when no like existed.
    pub async fn delete_like(&self, highlight_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM highlight_likes WHERE highlight_id = $1 AND user_id = $2")
                .bind(highlight_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete like", e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    /// Current like count for a highlight.
    pub async fn like_count(&self, highlight_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM highlight_likes WHERE highlight_id = $1")
            .bind(highlight_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count likes", e))
    }

    /// Insert a comment and return it with the author nickname joined.
    pub async fn insert_comment(
        &self,
        highlight_id: Uuid,
        author_id: Uuid,
        body: &str,
    ) -> AppResult<HighlightComment> {
        sqlx::query_as::<_, HighlightComment>(
            "WITH inserted AS (\
                 INSERT INTO highlight_comments (highlight_id, author_id, body) \
                 VALUES ($1, $2, $3) RETURNING *\
             ) \
             SELECT i.id, i.highlight_id, i.author_id, u.nickname AS author_nickname, \
                    i.body, i.created_at \
             FROM inserted i JOIN users u ON u.id = i.author_id",
        )
        .bind(highlight_id)
        .bind(author_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert comment", e))
    }

    /// Find a comment by primary key.
    pub async fn find_comment(&self, comment_id: Uuid) -> AppResult<Option<HighlightComment>> {
        sqlx::query_as::<_, HighlightComment>(
            "SELECT c.id, c.highlight_id, c.author_id, u.nickname AS author_nickname, \
                    c.body, c.created_at \
             FROM highlight_comments c JOIN users u ON u.id = c.author_id \
             WHERE c.id = $1",
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    /// Delete a comment by ID.
    pub async fn delete_comment(&self, comment_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM highlight_comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete comment", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Comments on a highlight, oldest first.
    pub async fn comments_for(&self, highlight_id: Uuid) -> AppResult<Vec<HighlightComment>> {
        sqlx::query_as::<_, HighlightComment>(
            "SELECT c.id, c.highlight_id, c.author_id, u.nickname AS author_nickname, \
                    c.body, c.created_at \
             FROM highlight_comments c JOIN users u ON u.id = c.author_id \
             WHERE c.highlight_id = $1 \
             ORDER BY c.created_at ASC",
        )
        .bind(highlight_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))
    }

    /// Likes placed on the given author's highlights by other users,
    /// newest first. Feeds the like notification source.
    pub async fn likes_on_author(&self, author_id: Uuid, limit: i64) -> AppResult<Vec<LikeEvent>> {
        sqlx::query_as::<_, LikeEvent>(
            "SELECT l.highlight_id, h.caption AS highlight_caption, \
                    l.user_id AS liker_id, u.nickname AS liker_nickname, l.created_at \
             FROM highlight_likes l \
             JOIN highlights h ON h.id = l.highlight_id \
             JOIN users u ON u.id = l.user_id \
             WHERE h.author_id = $1 AND l.user_id <> $1 \
             ORDER BY l.created_at DESC LIMIT $2",
        )
        .bind(author_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list like events", e))
    }

    /// Comments posted on the given author's highlights by other users,
    /// newest first. Feeds the comment notification source.
    pub async fn comments_on_author(
        &self,
        author_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<CommentEvent>> {
        sqlx::query_as::<_, CommentEvent>(
            "SELECT c.id AS comment_id, c.highlight_id, \
                    c.author_id AS commenter_id, u.nickname AS commenter_nickname, \
                    c.body, c.created_at \
             FROM highlight_comments c \
             JOIN highlights h ON h.id = c.highlight_id \
             JOIN users u ON u.id = c.author_id \
             WHERE h.author_id = $1 AND c.author_id <> $1 \
             ORDER BY c.created_at DESC LIMIT $2",
        )
        .bind(author_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list comment events", e)
        })
    }
}

//! Highlight posting, feed, likes, and comments.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use capture_core::error::AppError;
use capture_core::types::pagination::{PageRequest, PageResponse};
use capture_database::repositories::highlight::HighlightRepository;
use capture_entity::highlight::comment::HighlightComment;
use capture_entity::highlight::model::{Highlight, HighlightCard, MediaKind};
use capture_storage::media::MediaStore;

use crate::context::RequestContext;

/// Longest accepted caption and comment, in characters.
const MAX_CAPTION_CHARS: usize = 500;
const MAX_COMMENT_CHARS: usize = 500;

/// Handles highlight posting and feed interactions.
#[derive(Clone)]
pub struct HighlightService {
    highlight_repo: Arc<HighlightRepository>,
    media: Arc<MediaStore>,
}

impl HighlightService {
    /// Creates a new highlight service.
    pub fn new(highlight_repo: Arc<HighlightRepository>, media: Arc<MediaStore>) -> Self {
        Self {
            highlight_repo,
            media,
        }
    }

    /// Uploads the media object and creates the highlight.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        caption: &str,
        sport: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<Highlight, AppError> {
        let caption = caption.trim();
        if caption.is_empty() {
            return Err(AppError::validation("Caption cannot be empty"));
        }
        if caption.chars().count() > MAX_CAPTION_CHARS {
            return Err(AppError::validation("Caption is too long"));
        }
        if sport.trim().is_empty() {
            return Err(AppError::validation("Sport cannot be empty"));
        }

        let media_kind = if content_type.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        };
        let media_url = self.media.store("highlights", content_type, data).await?;

        let highlight = match self
            .highlight_repo
            .create(ctx.user_id, caption, &media_url, media_kind, sport.trim())
            .await
        {
            Ok(highlight) => highlight,
            Err(e) => {
                // The row never landed, so the object is orphaned.
                if let Err(cleanup) = self.media.delete(&media_url).await {
                    warn!(error = %cleanup, "Failed to remove orphaned media");
                }
                return Err(e);
            }
        };

        info!(highlight_id = %highlight.id, user_id = %ctx.user_id, "Highlight posted");
        Ok(highlight)
    }

    /// The paginated feed as seen by the viewer, newest first.
    pub async fn feed(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<HighlightCard>, AppError> {
        self.highlight_repo.feed(ctx.user_id, page).await
    }

    /// A single highlight card (permalink view).
    pub async fn get_card(
        &self,
        ctx: &RequestContext,
        highlight_id: Uuid,
    ) -> Result<HighlightCard, AppError> {
        self.highlight_repo
            .card_by_id(ctx.user_id, highlight_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Highlight {highlight_id} not found")))
    }

    /// Highlights posted by one author.
    pub async fn by_author(
        &self,
        ctx: &RequestContext,
        author_id: Uuid,
    ) -> Result<Vec<HighlightCard>, AppError> {
        self.highlight_repo
            .cards_by_author(ctx.user_id, author_id)
            .await
    }

    /// Toggles the viewer's like. Returns the new liked state and count.
    pub async fn toggle_like(
        &self,
        ctx: &RequestContext,
        highlight_id: Uuid,
    ) -> Result<(bool, i64), AppError> {
        self.require_highlight(highlight_id).await?;

        // Insert first; losing the race to another of the viewer's own
        // requests just turns this call into the remove half.
        let liked = if self
            .highlight_repo
            .insert_like(highlight_id, ctx.user_id)
            .await?
        {
            true
        } else {
            self.highlight_repo
                .delete_like(highlight_id, ctx.user_id)
                .await?;
            false
        };

        let count = self.highlight_repo.like_count(highlight_id).await?;
        Ok((liked, count))
    }

    /// Edits the caption. Only the author may edit, compared by user ID.
    pub async fn update_caption(
        &self,
        ctx: &RequestContext,
        highlight_id: Uuid,
        caption: &str,
    ) -> Result<Highlight, AppError> {
        let caption = caption.trim();
        if caption.is_empty() {
            return Err(AppError::validation("Caption cannot be empty"));
        }
        if caption.chars().count() > MAX_CAPTION_CHARS {
            return Err(AppError::validation("Caption is too long"));
        }

        let highlight = self.require_highlight(highlight_id).await?;
        if highlight.author_id != ctx.user_id {
            return Err(AppError::forbidden("Only the author can edit a highlight"));
        }

        self.highlight_repo.update_caption(highlight_id, caption).await
    }

    /// Deletes a highlight and its media. Only the author may delete.
    pub async fn delete(&self, ctx: &RequestContext, highlight_id: Uuid) -> Result<(), AppError> {
        let highlight = self.require_highlight(highlight_id).await?;
        if highlight.author_id != ctx.user_id {
            return Err(AppError::forbidden("Only the author can delete a highlight"));
        }

        self.highlight_repo.delete(highlight_id).await?;
        if let Err(e) = self.media.delete(&highlight.media_url).await {
            warn!(error = %e, "Failed to remove highlight media");
        }

        info!(highlight_id = %highlight_id, user_id = %ctx.user_id, "Highlight deleted");
        Ok(())
    }

    /// Comments on a highlight, oldest first.
    pub async fn comments(&self, highlight_id: Uuid) -> Result<Vec<HighlightComment>, AppError> {
        self.require_highlight(highlight_id).await?;
        self.highlight_repo.comments_for(highlight_id).await
    }

    /// Adds a comment.
    pub async fn add_comment(
        &self,
        ctx: &RequestContext,
        highlight_id: Uuid,
        body: &str,
    ) -> Result<HighlightComment, AppError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::validation("Comment cannot be empty"));
        }
        if body.chars().count() > MAX_COMMENT_CHARS {
            return Err(AppError::validation("Comment is too long"));
        }

        self.require_highlight(highlight_id).await?;
        self.highlight_repo
            .insert_comment(highlight_id, ctx.user_id, body)
            .await
    }

    /// Deletes a comment. Allowed for the comment author and for the
    /// highlight author, compared by user ID.
    pub async fn delete_comment(
        &self,
        ctx: &RequestContext,
        comment_id: Uuid,
    ) -> Result<(), AppError> {
        let comment = self
            .highlight_repo
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Comment {comment_id} not found")))?;

        if comment.author_id != ctx.user_id {
            let highlight = self.require_highlight(comment.highlight_id).await?;
            if highlight.author_id != ctx.user_id {
                return Err(AppError::forbidden(
                    "Only the comment author or post author can delete a comment",
                ));
            }
        }

        self.highlight_repo.delete_comment(comment_id).await?;
        Ok(())
    }

    async fn require_highlight(&self, highlight_id: Uuid) -> Result<Highlight, AppError> {
        self.highlight_repo
            .find_by_id(highlight_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Highlight {highlight_id} not found")))
    }
}

//! Notification feed loading and watermark advancement.

use std::sync::Arc;

use tracing::warn;

use capture_core::error::AppError;
use capture_database::repositories::highlight::HighlightRepository;
use capture_database::repositories::meetup::MeetupRepository;
use capture_database::repositories::watermark::WatermarkRepository;
use capture_entity::notification::item::NotificationItem;

use crate::context::RequestContext;

use super::aggregator::{aggregate, NotificationSources};

/// How many rows each interaction source contributes at most.
const SOURCE_LIMIT: i64 = 50;

/// Builds the aggregated notification feed.
#[derive(Clone)]
pub struct NotificationService {
    highlight_repo: Arc<HighlightRepository>,
    meetup_repo: Arc<MeetupRepository>,
    watermark_repo: Arc<WatermarkRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        highlight_repo: Arc<HighlightRepository>,
        meetup_repo: Arc<MeetupRepository>,
        watermark_repo: Arc<WatermarkRepository>,
    ) -> Self {
        Self {
            highlight_repo,
            meetup_repo,
            watermark_repo,
        }
    }

    /// Loads the feed and advances the watermark to now.
    ///
    /// Read flags reflect the watermark as it stood *before* this load;
    /// the advance makes everything currently visible count as read from
    /// the next load on.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<NotificationItem>, AppError> {
        let items = self.build_feed(ctx).await?;

        self.watermark_repo
            .advance(ctx.user_id, ctx.request_time)
            .await?;

        Ok(items)
    }

    /// Number of currently unread items, without touching the watermark.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<usize, AppError> {
        let items = self.build_feed(ctx).await?;
        Ok(items.iter().filter(|i| !i.is_read).count())
    }

    async fn build_feed(&self, ctx: &RequestContext) -> Result<Vec<NotificationItem>, AppError> {
        let watermark = self
            .watermark_repo
            .find_by_user(ctx.user_id)
            .await?
            .map(|w| w.last_read_at);

        // Each source degrades independently: a failing source drops its
        // items from this load instead of blanking the whole feed.
        let (likes, comments, joined) = tokio::join!(
            self.highlight_repo.likes_on_author(ctx.user_id, SOURCE_LIMIT),
            self.highlight_repo
                .comments_on_author(ctx.user_id, SOURCE_LIMIT),
            self.meetup_repo.joined_by_user(ctx.user_id),
        );

        let sources = NotificationSources {
            likes: likes.unwrap_or_else(|e| {
                warn!(error = %e, "Like source failed, degrading");
                Vec::new()
            }),
            comments: comments.unwrap_or_else(|e| {
                warn!(error = %e, "Comment source failed, degrading");
                Vec::new()
            }),
            joined: joined.unwrap_or_else(|e| {
                warn!(error = %e, "Meetup source failed, degrading");
                Vec::new()
            }),
        };

        Ok(aggregate(sources, ctx.request_time, watermark))
    }
}

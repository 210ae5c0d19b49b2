//! Raw source rows the notification aggregator is built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A like on one of the viewer's highlights.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LikeEvent {
    /// The liked highlight.
    pub highlight_id: Uuid,
    /// Caption of the liked highlight, for the notification body.
    pub highlight_caption: String,
    /// The user who liked it.
    pub liker_id: Uuid,
    /// Display name of the liker.
    pub liker_nickname: String,
    /// When the like was placed.
    pub created_at: DateTime<Utc>,
}

/// A comment on one of the viewer's highlights.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentEvent {
    /// The comment row.
    pub comment_id: Uuid,
    /// The commented highlight.
    pub highlight_id: Uuid,
    /// The commenting user.
    pub commenter_id: Uuid,
    /// Display name of the commenter.
    pub commenter_nickname: String,
    /// Comment body, for the notification message.
    pub body: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// A meetup the viewer has joined, with the flags the reminder and
/// feedback sources need.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JoinedMeetup {
    /// The meetup.
    pub meetup_id: Uuid,
    /// Session title, for the notification body.
    pub title: String,
    /// Scheduled start time.
    pub starts_at: DateTime<Utc>,
    /// Scheduled end time.
    pub ends_at: DateTime<Utc>,
    /// Whether the viewer already has a feedback row (real or skip) for
    /// this meetup.
    pub feedback_given: bool,
}

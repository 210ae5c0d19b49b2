//! Highlight entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Kind of media attached to a highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A still image.
    Image,
    /// A video clip.
    Video,
}

/// A user-submitted sports highlight post.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Highlight {
    /// Unique highlight identifier.
    pub id: Uuid,
    /// The author's user ID. Ownership checks compare this, never nicknames.
    pub author_id: Uuid,
    /// Caption text.
    pub caption: String,
    /// Public URL of the uploaded media object.
    pub media_url: String,
    /// Whether the media is an image or a video.
    pub media_kind: MediaKind,
    /// Sport category.
    pub sport: String,
    /// When the highlight was posted.
    pub created_at: DateTime<Utc>,
    /// When the caption was last edited.
    pub updated_at: DateTime<Utc>,
}

/// A highlight joined with its author and interaction counts, as shown in
/// the feed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HighlightCard {
    /// Unique highlight identifier.
    pub id: Uuid,
    /// The author's user ID.
    pub author_id: Uuid,
    /// The author's display name.
    pub author_nickname: String,
    /// The author's avatar URL.
    pub author_avatar_url: Option<String>,
    /// Caption text.
    pub caption: String,
    /// Public media URL.
    pub media_url: String,
    /// Media kind.
    pub media_kind: MediaKind,
    /// Sport category.
    pub sport: String,
    /// Number of likes.
    pub like_count: i64,
    /// Number of comments.
    pub comment_count: i64,
    /// Whether the requesting viewer has liked this highlight.
    pub liked_by_viewer: bool,
    /// When the highlight was posted.
    pub created_at: DateTime<Utc>,
}

//! Highlight comment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A comment on a highlight.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HighlightComment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// The highlight this comment belongs to.
    pub highlight_id: Uuid,
    /// The comment author's user ID.
    pub author_id: Uuid,
    /// The author's display name (joined for display).
    pub author_nickname: String,
    /// Comment body.
    pub body: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

//! Follow relationship entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A directed follow edge between two users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Follow {
    /// The user doing the following.
    pub follower_id: Uuid,
    /// The user being followed.
    pub followee_id: Uuid,
    /// When the follow was created.
    pub created_at: DateTime<Utc>,
}

//! Per-user notification read watermark.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single "read up to here" timestamp per user.
///
/// Opening the notification surface advances this to now, marking every
/// currently loaded item as read — a deliberate simplification, not a
/// guarantee the user visually saw each item.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReadWatermark {
    /// The owning user.
    pub user_id: Uuid,
    /// Items with `timestamp <= last_read_at` are considered read.
    pub last_read_at: DateTime<Utc>,
}

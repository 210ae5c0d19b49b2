//! Derived notification items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source kind of an aggregated notification item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Another user liked one of the viewer's highlights.
    Like,
    /// Another user commented on one of the viewer's highlights.
    Comment,
    /// A joined meetup starts within one of the reminder windows.
    Reminder,
    /// A joined meetup has ended and the viewer has not submitted feedback.
    FeedbackDue,
}

/// A single entry in the aggregated notification feed.
///
/// Constructed fresh on every load; `is_read` is derived by comparing the
/// event timestamp against the viewer's stored read watermark, never
/// stored per item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationItem {
    /// Stable identifier, unique per event (kind + source row + timestamp).
    pub id: String,
    /// Which source produced this item.
    pub kind: NotificationKind,
    /// Short title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Event timestamp used for ordering and read derivation.
    pub timestamp: DateTime<Utc>,
    /// Relative display time ("5m ago").
    pub display_time: String,
    /// In-app link the item navigates to.
    pub target_link: String,
    /// Read iff `timestamp <= watermark` at render time.
    pub is_read: bool,
}

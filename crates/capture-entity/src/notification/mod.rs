//! Notification view entities.
//!
//! Notification items are never persisted as rows; they are rebuilt on
//! every load from the like, comment, meetup, and feedback tables. Only
//! the per-user read watermark is stored.

pub mod item;
pub mod source;
pub mod watermark;

pub use item::{NotificationItem, NotificationKind};
pub use source::{CommentEvent, JoinedMeetup, LikeEvent};
pub use watermark::ReadWatermark;

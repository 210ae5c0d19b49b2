//! Meetup feedback entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A feedback record submitted by a participant after a meetup ends.
///
/// A `rating` of zero marks a skipped feedback; the row still exists so
/// the notification aggregator stops re-prompting this (meetup, author)
/// pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MeetupFeedback {
    /// Unique feedback identifier.
    pub id: Uuid,
    /// The meetup this feedback is about.
    pub meetup_id: Uuid,
    /// The participant who submitted it.
    pub author_id: Uuid,
    /// The participant voted star player, if any.
    pub star_user_id: Option<Uuid>,
    /// The participant voted best manners, if any.
    pub manner_user_id: Option<Uuid>,
    /// Overall session rating, 0 (skipped) to 5.
    pub rating: i32,
    /// Free-form comment.
    pub comment: Option<String>,
    /// When the feedback was submitted.
    pub created_at: DateTime<Utc>,
}

impl MeetupFeedback {
    /// Whether this row records a skipped feedback prompt.
    pub fn is_skip(&self) -> bool {
        self.rating == 0
    }
}

/// Data submitted through the feedback flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    /// Star-player selection.
    pub star_user_id: Option<Uuid>,
    /// Manner-player selection.
    pub manner_user_id: Option<Uuid>,
    /// Session rating, 1 to 5.
    pub rating: i32,
    /// Free-form comment.
    pub comment: Option<String>,
}

//! Derived session summary shown in the meetup list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Meetup;
use super::status::MeetupStatus;

/// A meetup joined with its host and participants, plus values computed
/// for the requesting viewer (distance, membership flags).
///
/// Never persisted; rebuilt on every list fetch. The joined count shown
/// here is authoritative as of the fetch, and local adjustments on the
/// client are reconciled against the next one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// The underlying meetup row.
    #[serde(flatten)]
    pub meetup: Meetup,
    /// The host's display name.
    pub host_nickname: String,
    /// IDs of all current participants (host included).
    pub participant_ids: Vec<Uuid>,
    /// Number of current participants.
    pub joined_count: i64,
    /// Whether the viewer hosts this meetup.
    pub hosted_by_viewer: bool,
    /// Whether the viewer has joined this meetup.
    pub joined_by_viewer: bool,
    /// Distance from the viewer's home coordinates in km, when known.
    pub distance_km: Option<f64>,
    /// Formatted distance label ("490m", "1.2km"), when known.
    pub distance_label: Option<String>,
}

impl SessionSummary {
    /// Whether this session is hosted by the viewer and already over.
    pub fn hosted_and_ended(&self, now: DateTime<Utc>) -> bool {
        self.hosted_by_viewer && self.meetup.has_ended(now)
    }

    /// Whether the meetup can still accept a new participant.
    pub fn has_open_slot(&self) -> bool {
        self.meetup.status == MeetupStatus::Recruiting
            && self.joined_count < i64::from(self.meetup.capacity)
    }
}

//! Meetup entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::MeetupStatus;

/// A scheduled, location-tagged group activity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meetup {
    /// Unique meetup identifier.
    pub id: Uuid,
    /// The hosting user's ID.
    pub host_id: Uuid,
    /// Session title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Sport category.
    pub sport: String,
    /// Skill level ("Beginner", "Intermediate", "Advanced", or "Any").
    pub level: String,
    /// Human-readable location name.
    pub location_name: String,
    /// Venue latitude.
    pub lat: f64,
    /// Venue longitude.
    pub lng: f64,
    /// Scheduled start time.
    pub starts_at: DateTime<Utc>,
    /// Scheduled end time.
    pub ends_at: DateTime<Utc>,
    /// Maximum participant count, including the host.
    pub capacity: i32,
    /// Lifecycle status.
    pub status: MeetupStatus,
    /// When the meetup was created.
    pub created_at: DateTime<Utc>,
}

impl Meetup {
    /// Whether the scheduled end time is in the past.
    ///
    /// Chat becomes read-only from this point regardless of status.
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.ends_at < now
    }
}

/// A participant row linking a user to a meetup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MeetupParticipant {
    /// The meetup.
    pub meetup_id: Uuid,
    /// The participating user.
    pub user_id: Uuid,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

/// Data required to create a new meetup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeetup {
    /// Session title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Sport category.
    pub sport: String,
    /// Skill level.
    pub level: String,
    /// Human-readable location name.
    pub location_name: String,
    /// Venue latitude.
    pub lat: f64,
    /// Venue longitude.
    pub lng: f64,
    /// Scheduled start time.
    pub starts_at: DateTime<Utc>,
    /// Scheduled end time.
    pub ends_at: DateTime<Utc>,
    /// Maximum participant count.
    pub capacity: i32,
}

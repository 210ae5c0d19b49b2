//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use capture_core::types::geo::Coordinates;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Argon2 password hash. Empty for OAuth-only accounts.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name shown on posts and meetups.
    pub nickname: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Profile bio text.
    pub bio: Option<String>,
    /// Preferred sport category.
    pub favorite_sport: Option<String>,
    /// Home latitude, used as the viewer position for distance sorting.
    pub home_lat: Option<f64>,
    /// Home longitude.
    pub home_lng: Option<f64>,
    /// Times this user was voted star player of a meetup.
    pub star_count: i32,
    /// Times this user was voted best manners of a meetup.
    pub manner_count: i32,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The viewer's stored home coordinates, if both components are set.
    pub fn home_coordinates(&self) -> Option<Coordinates> {
        match (self.home_lat, self.home_lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Pre-hashed password (empty for OAuth accounts).
    pub password_hash: String,
    /// Display name.
    pub nickname: String,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProfile {
    /// New display name.
    pub nickname: Option<String>,
    /// New avatar URL.
    pub avatar_url: Option<String>,
    /// New bio.
    pub bio: Option<String>,
    /// New preferred sport.
    pub favorite_sport: Option<String>,
    /// New home latitude.
    pub home_lat: Option<f64>,
    /// New home longitude.
    pub home_lng: Option<f64>,
}

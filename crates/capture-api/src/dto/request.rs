//! Request DTOs.
//!
//! Meetup creation, profile updates, and feedback submission deserialize
//! straight into their entity structs (`CreateMeetup`, `UpdateProfile`,
//! `FeedbackSubmission`); only API-specific shapes live here.

use serde::{Deserialize, Serialize};

/// Registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub nickname: String,
}

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Token refresh request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token issued at login.
    pub refresh_token: String,
}

/// OAuth redirect callback payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthCallbackRequest {
    /// Authorization code from the provider redirect.
    pub code: String,
}

/// Chat message payload (meetup chat and DMs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Message body.
    pub body: String,
}

/// Highlight comment payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    /// Comment body.
    pub body: String,
}

/// Highlight caption update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCaptionRequest {
    /// New caption text.
    pub caption: String,
}

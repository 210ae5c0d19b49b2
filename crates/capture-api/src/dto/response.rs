//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use capture_auth::jwt::TokenPair;
use capture_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response for login, registration, OAuth callback, and token refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
    /// The authenticated user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl AuthResponse {
    /// Builds the response from a token pair and the user it belongs to.
    pub fn new(tokens: TokenPair, user: Option<User>) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
            user,
        }
    }
}

/// Basic health probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Detailed health probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Service status.
    pub status: String,
    /// Database connectivity.
    pub database: String,
    /// Live WebSocket connection count.
    pub ws_connections: usize,
}

/// Simple message acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable result message.
    pub message: String,
}

impl MessageResponse {
    /// Creates an acknowledgement.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A bare count (unread notifications, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// The count.
    pub count: u64,
}

/// Result of toggling a like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    /// Whether the viewer now likes the highlight.
    pub liked: bool,
    /// Like count after the toggle.
    pub like_count: i64,
}

/// A shareable permalink for a highlight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkResponse {
    /// Absolute URL built from the server's public base URL.
    pub url: String,
}

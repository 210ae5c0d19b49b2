//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Extracted from the access token by the API layer and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The username (convenience field from JWT claims).
    pub username: String,
    /// The display name at token issuance.
    pub nickname: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, username: String, nickname: String) -> Self {
        Self {
            user_id,
            username,
            nickname,
            request_time: Utc::now(),
        }
    }
}

//! JWT claims structure used in access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims payload embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Username for convenience.
    pub username: String,
    /// Display name at the time of token issuance.
    pub nickname: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// JWT ID for blocklist tracking.
    pub jti: Uuid,
    /// Token type: "access" or "refresh".
    pub token_type: TokenType,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token for obtaining new access tokens.
    Refresh,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Returns the remaining TTL in seconds (0 if expired).
    pub fn remaining_ttl_seconds(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 { remaining as u64 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp_offset_secs: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: Uuid::new_v4(),
            username: "jo".into(),
            nickname: "Jo".into(),
            iat: now,
            exp: now + exp_offset_secs,
            jti: Uuid::new_v4(),
            token_type: TokenType::Access,
        }
    }

    #[test]
    fn expired_token_is_detected() {
        assert!(claims(-10).is_expired());
        assert!(!claims(600).is_expired());
    }

    #[test]
    fn remaining_ttl_floors_at_zero() {
        assert_eq!(claims(-10).remaining_ttl_seconds(), 0);
        assert!(claims(600).remaining_ttl_seconds() > 590);
    }
}

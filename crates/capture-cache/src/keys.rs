//! Cache key builders for all Capture Now cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Prefix applied to all Capture Now cache keys.
const PREFIX: &str = "capture";

// ── User keys ──────────────────────────────────────────────

/// Cache key for a user profile by ID.
pub fn profile_by_id(user_id: Uuid) -> String {
    format!("{PREFIX}:profile:{user_id}")
}

/// Cache key for a user entity by username.
pub fn user_by_username(username: &str) -> String {
    format!("{PREFIX}:user:name:{}", username.to_lowercase())
}

// ── Token keys ─────────────────────────────────────────────

/// Cache key for a blocklisted JWT ID.
pub fn jwt_blocklist(jti: &str) -> String {
    format!("{PREFIX}:jwt:blocked:{jti}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_keys_are_case_insensitive() {
        assert_eq!(user_by_username("JoRdAn"), user_by_username("jordan"));
    }
}

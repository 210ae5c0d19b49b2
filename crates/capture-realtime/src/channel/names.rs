//! Channel naming scheme.

use uuid::Uuid;

/// Channel carrying a meetup's group chat thread.
pub fn meetup_chat(meetup_id: Uuid) -> String {
    format!("meetup:{meetup_id}")
}

/// Channel carrying all direct messages addressed to or sent by a user.
pub fn direct_messages(user_id: Uuid) -> String {
    format!("dm:{user_id}")
}

/// Parse a meetup chat channel name back into its meetup ID.
pub fn parse_meetup_chat(channel: &str) -> Option<Uuid> {
    channel
        .strip_prefix("meetup:")
        .and_then(|s| Uuid::parse_str(s).ok())
}

/// Parse a direct-message channel name back into its user ID.
pub fn parse_direct_messages(channel: &str) -> Option<Uuid> {
    channel
        .strip_prefix("dm:")
        .and_then(|s| Uuid::parse_str(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_meetup_channel() {
        let id = Uuid::new_v4();
        assert_eq!(parse_meetup_chat(&meetup_chat(id)), Some(id));
        assert_eq!(parse_meetup_chat("dm:whatever"), None);
        assert_eq!(parse_meetup_chat("meetup:not-a-uuid"), None);
    }

    #[test]
    fn test_round_trip_dm_channel() {
        let id = Uuid::new_v4();
        assert_eq!(parse_direct_messages(&direct_messages(id)), Some(id));
        assert_eq!(parse_direct_messages(&meetup_chat(id)), None);
    }
}

//! Grouping direct messages into per-partner conversations.

use std::collections::HashSet;

use uuid::Uuid;

use capture_entity::message::model::{ConversationSummary, Message};

/// Collapses a newest-first DM list into one entry per partner.
///
/// The input must already be ordered newest first; the first message
/// seen for each partner is therefore the latest one, and output order
/// follows recency of that latest message.
pub fn group_conversations(
    viewer_id: Uuid,
    messages: Vec<Message>,
    nickname_of: impl Fn(Uuid) -> Option<String>,
) -> Vec<ConversationSummary> {
    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut conversations = Vec::new();

    for message in messages {
        let Some(partner_id) = message.partner_of(viewer_id) else {
            continue;
        };
        if !seen.insert(partner_id) {
            continue;
        }

        let partner_nickname = if message.sender_id == viewer_id {
            nickname_of(partner_id).unwrap_or_else(|| "Unknown".to_string())
        } else {
            message.sender_nickname.clone()
        };

        conversations.push(ConversationSummary {
            partner_id,
            partner_nickname,
            last_message: message,
        });
    }

    conversations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn dm(sender: Uuid, recipient: Uuid, body: &str, minutes_ago: i64) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: sender,
            sender_nickname: "Sender".into(),
            meetup_id: None,
            recipient_id: Some(recipient),
            body: body.into(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_keeps_latest_message_per_partner() {
        let viewer = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        // Newest first, as the repository returns them.
        let messages = vec![
            dm(alice, viewer, "newest from alice", 1),
            dm(viewer, bob, "to bob", 2),
            dm(viewer, alice, "older to alice", 3),
            dm(bob, viewer, "oldest from bob", 4),
        ];

        let conversations = group_conversations(viewer, messages, |_| Some("Partner".into()));

        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].partner_id, alice);
        assert_eq!(conversations[0].last_message.body, "newest from alice");
        assert_eq!(conversations[1].partner_id, bob);
        assert_eq!(conversations[1].last_message.body, "to bob");
    }

    #[test]
    fn test_partner_nickname_resolution() {
        let viewer = Uuid::new_v4();
        let partner = Uuid::new_v4();

        // Viewer sent the latest message, so the sender nickname is the
        // viewer's own and the partner name comes from the lookup.
        let sent = group_conversations(viewer, vec![dm(viewer, partner, "hi", 1)], |id| {
            assert_eq!(id, partner);
            Some("Aki".into())
        });
        assert_eq!(sent[0].partner_nickname, "Aki");

        // Partner sent it, so their nickname rides on the message.
        let received = group_conversations(viewer, vec![dm(partner, viewer, "yo", 1)], |_| None);
        assert_eq!(received[0].partner_nickname, "Sender");
    }

    #[test]
    fn test_meetup_messages_are_ignored() {
        let viewer = Uuid::new_v4();
        let mut message = dm(viewer, Uuid::new_v4(), "x", 1);
        message.recipient_id = None;
        message.meetup_id = Some(Uuid::new_v4());

        let conversations = group_conversations(viewer, vec![message], |_| None);
        assert!(conversations.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let conversations = group_conversations(Uuid::new_v4(), vec![], |_| None);
        assert!(conversations.is_empty());
    }
}

//! Chat message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A chat message, either in a meetup thread or a direct message.
///
/// Exactly one of `meetup_id` / `recipient_id` is set: `meetup_id` for
/// meetup chat, `recipient_id` for direct messages.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier. Doubles as the realtime dedup key.
    pub id: Uuid,
    /// The sending user.
    pub sender_id: Uuid,
    /// The sender's display name (joined for display).
    pub sender_nickname: String,
    /// Meetup thread this message belongs to, if any.
    pub meetup_id: Option<Uuid>,
    /// Direct-message recipient, if any.
    pub recipient_id: Option<Uuid>,
    /// Message body.
    pub body: String,
    /// When the message was sent.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// The DM partner of `viewer_id` for this message, if it is a DM.
    pub fn partner_of(&self, viewer_id: Uuid) -> Option<Uuid> {
        let recipient = self.recipient_id?;
        if self.sender_id == viewer_id {
            Some(recipient)
        } else {
            Some(self.sender_id)
        }
    }
}

/// One entry per distinct DM partner, holding only the newest message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// The conversation partner's user ID.
    pub partner_id: Uuid,
    /// The partner's display name.
    pub partner_nickname: String,
    /// The latest message exchanged with this partner.
    pub last_message: Message,
}

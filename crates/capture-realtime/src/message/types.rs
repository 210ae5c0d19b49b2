//! Inbound and outbound WebSocket message type definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use capture_entity::message::model::Message;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Subscribe to a channel.
    Subscribe {
        /// Channel name.
        channel: String,
    },
    /// Unsubscribe from a channel.
    Unsubscribe {
        /// Channel name.
        channel: String,
    },
    /// Pong response to server ping.
    Pong {
        /// Echoed timestamp.
        timestamp: i64,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Subscription confirmed.
    Subscribed {
        /// Channel name.
        channel: String,
    },
    /// Unsubscription confirmed.
    Unsubscribed {
        /// Channel name.
        channel: String,
    },
    /// A chat message was inserted into a subscribed thread.
    MessageNew {
        /// The inserted message, nicknames joined.
        message: Message,
    },
    /// Server-initiated ping.
    Ping {
        /// Timestamp the client echoes back.
        timestamp: i64,
    },
    /// Protocol error report.
    Error {
        /// Human-readable description.
        message: String,
    },
}

impl OutboundMessage {
    /// The deduplication key for this message, when it has one.
    ///
    /// Chat inserts dedup on the persisted message ID; control frames
    /// are never deduplicated.
    pub fn dedup_id(&self) -> Option<Uuid> {
        match self {
            OutboundMessage::MessageNew { message } => Some(message.id),
            _ => None,
        }
    }
}

//! Message envelope for framing WebSocket messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::OutboundMessage;

/// Envelope wrapping outbound messages with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope {
    /// Unique envelope ID.
    pub id: Uuid,
    /// Channel this message was sent on (if any).
    pub channel: Option<String>,
    /// The message payload.
    pub data: OutboundMessage,
    /// When the envelope was created.
    pub timestamp: DateTime<Utc>,
}

impl MessageEnvelope {
    /// Create an envelope for a channel message.
    pub fn on_channel(data: OutboundMessage, channel: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: Some(channel.to_string()),
            data,
            timestamp: Utc::now(),
        }
    }

    /// Create an envelope for a direct (non-channel) message.
    pub fn direct(data: OutboundMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: None,
            data,
            timestamp: Utc::now(),
        }
    }
}

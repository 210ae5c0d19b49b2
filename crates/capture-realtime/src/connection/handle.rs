//! Individual WebSocket connection handle.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::message::dedup::DedupWindow;
use crate::message::envelope::MessageEnvelope;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// A handle to a single WebSocket connection.
///
/// Holds the sender half for pushing envelopes to the socket task, plus
/// the per-connection dedup window.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// User who owns this connection.
    pub user_id: Uuid,
    /// Display name (cached from the access token).
    pub nickname: String,
    /// Sender for outbound envelopes.
    sender: mpsc::Sender<MessageEnvelope>,
    /// Recently delivered message IDs.
    dedup: Mutex<DedupWindow>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Whether the connection is still alive.
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle.
    pub fn new(
        user_id: Uuid,
        nickname: String,
        sender: mpsc::Sender<MessageEnvelope>,
        dedup_window_size: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            nickname,
            sender,
            dedup: Mutex::new(DedupWindow::new(dedup_window_size)),
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Send an envelope to this connection, applying dedup.
    ///
    /// Returns true when the envelope was queued for delivery.
    pub fn send(&self, envelope: MessageEnvelope) -> bool {
        if !self.is_alive() {
            return false;
        }

        if let Some(dedup_id) = envelope.data.dedup_id() {
            let mut window = self.dedup.lock().unwrap_or_else(|e| e.into_inner());
            if !window.insert(dedup_id) {
                tracing::debug!(
                    connection_id = %self.id,
                    message_id = %dedup_id,
                    "Suppressing duplicate delivery"
                );
                return false;
            }
        }

        match self.sender.try_send(envelope) {
            Ok(_) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(connection_id = %self.id, "Send buffer full, dropping message");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check if the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the connection as dead.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture_entity::message::model::Message;

    use crate::message::types::OutboundMessage;

    fn chat_message(id: Uuid) -> Message {
        Message {
            id,
            sender_id: Uuid::new_v4(),
            sender_nickname: "Riko".into(),
            meetup_id: Some(Uuid::new_v4()),
            recipient_id: None,
            body: "see you at the court".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_message_delivered_once() {
        let (tx, mut rx) = mpsc::channel(8);
        let handle = ConnectionHandle::new(Uuid::new_v4(), "Riko".into(), tx, 16);

        let message_id = Uuid::new_v4();
        let first = MessageEnvelope::on_channel(
            OutboundMessage::MessageNew {
                message: chat_message(message_id),
            },
            "meetup:x",
        );
        let second = MessageEnvelope::on_channel(
            OutboundMessage::MessageNew {
                message: chat_message(message_id),
            },
            "meetup:x",
        );

        assert!(handle.send(first));
        assert!(!handle.send(second));

        assert!(rx.recv().await.is_some());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_control_frames_are_not_deduplicated() {
        let (tx, _rx) = mpsc::channel(8);
        let handle = ConnectionHandle::new(Uuid::new_v4(), "Riko".into(), tx, 16);

        let ping = OutboundMessage::Ping { timestamp: 1 };
        assert!(handle.send(MessageEnvelope::direct(ping.clone())));
        assert!(handle.send(MessageEnvelope::direct(ping)));
    }

    #[tokio::test]
    async fn test_dead_connection_rejects_sends() {
        let (tx, _rx) = mpsc::channel(8);
        let handle = ConnectionHandle::new(Uuid::new_v4(), "Riko".into(), tx, 16);

        handle.mark_dead();
        assert!(!handle.send(MessageEnvelope::direct(OutboundMessage::Ping { timestamp: 1 })));
    }
}

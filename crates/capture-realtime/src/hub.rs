//! The realtime hub tying channels and connections together.

use std::sync::Arc;

use uuid::Uuid;

use capture_core::config::RealtimeConfig;
use capture_entity::message::model::Message;

use crate::channel::names;
use crate::channel::registry::ChannelRegistry;
use crate::connection::handle::{ConnectionHandle, ConnectionId};
use crate::connection::manager::ConnectionManager;
use crate::message::envelope::MessageEnvelope;
use crate::message::types::OutboundMessage;

/// Process-wide realtime state shared between the WebSocket handlers and
/// the chat service.
#[derive(Debug)]
pub struct RealtimeHub {
    channels: Arc<ChannelRegistry>,
    connections: ConnectionManager,
}

impl RealtimeHub {
    /// Creates a hub from realtime configuration.
    pub fn new(config: RealtimeConfig) -> Self {
        let channels = Arc::new(ChannelRegistry::new());
        let connections = ConnectionManager::new(config, Arc::clone(&channels));
        Self {
            channels,
            connections,
        }
    }

    /// Registers a newly authenticated socket.
    pub fn register(
        &self,
        user_id: Uuid,
        nickname: String,
    ) -> (
        Arc<ConnectionHandle>,
        tokio::sync::mpsc::Receiver<MessageEnvelope>,
    ) {
        self.connections.register(user_id, nickname)
    }

    /// Tears a socket down.
    pub fn unregister(&self, conn_id: ConnectionId) {
        self.connections.unregister(conn_id);
    }

    /// Subscribes a connection to a channel. Authorization (meetup
    /// membership, DM ownership) is checked by the caller.
    pub fn subscribe(&self, channel: String, conn_id: ConnectionId) {
        self.channels.subscribe(channel, conn_id);
    }

    /// Unsubscribes a connection from a channel.
    pub fn unsubscribe(&self, channel: &str, conn_id: ConnectionId) {
        self.channels.unsubscribe(channel, conn_id);
    }

    /// Publishes a persisted chat message to the channels that carry it.
    ///
    /// A meetup message fans out on the meetup channel; a direct message
    /// fans out on both participants' DM channels. Per-connection dedup
    /// keeps a socket subscribed to several of these from rendering the
    /// message twice.
    pub fn publish_message(&self, message: &Message) -> usize {
        let mut delivered = 0;

        if let Some(meetup_id) = message.meetup_id {
            let channel = names::meetup_chat(meetup_id);
            let envelope = MessageEnvelope::on_channel(
                OutboundMessage::MessageNew {
                    message: message.clone(),
                },
                &channel,
            );
            delivered += self.connections.broadcast(&channel, &envelope);
        }

        if let Some(recipient_id) = message.recipient_id {
            for user_id in [message.sender_id, recipient_id] {
                let channel = names::direct_messages(user_id);
                let envelope = MessageEnvelope::on_channel(
                    OutboundMessage::MessageNew {
                        message: message.clone(),
                    },
                    &channel,
                );
                delivered += self.connections.broadcast(&channel, &envelope);
            }
        }

        delivered
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections.connection_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn hub() -> RealtimeHub {
        RealtimeHub::new(RealtimeConfig::default())
    }

    fn direct_message(sender_id: Uuid, recipient_id: Uuid) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id,
            sender_nickname: "Mina".into(),
            meetup_id: None,
            recipient_id: Some(recipient_id),
            body: "rematch tomorrow?".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_dm_reaches_both_sides_once() {
        let hub = hub();
        let sender = Uuid::new_v4();
        let recipient = Uuid::new_v4();

        let (sender_conn, mut sender_rx) = hub.register(sender, "Mina".into());
        let (recipient_conn, mut recipient_rx) = hub.register(recipient, "Taro".into());

        hub.subscribe(names::direct_messages(sender), sender_conn.id);
        hub.subscribe(names::direct_messages(recipient), recipient_conn.id);

        let delivered = hub.publish_message(&direct_message(sender, recipient));
        assert_eq!(delivered, 2);

        assert!(sender_rx.try_recv().is_ok());
        assert!(recipient_rx.try_recv().is_ok());
        assert!(sender_rx.try_recv().is_err());
        assert!(recipient_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_republish_is_suppressed_by_dedup() {
        let hub = hub();
        let sender = Uuid::new_v4();
        let recipient = Uuid::new_v4();

        let (conn, mut rx) = hub.register(recipient, "Taro".into());
        hub.subscribe(names::direct_messages(recipient), conn.id);

        let message = direct_message(sender, recipient);
        assert_eq!(hub.publish_message(&message), 1);
        assert_eq!(hub.publish_message(&message), 0);

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_meetup_message_skips_unsubscribed() {
        let hub = hub();
        let meetup_id = Uuid::new_v4();

        let (subscribed, mut sub_rx) = hub.register(Uuid::new_v4(), "A".into());
        let (_unsubscribed, mut unsub_rx) = hub.register(Uuid::new_v4(), "B".into());
        hub.subscribe(names::meetup_chat(meetup_id), subscribed.id);

        let message = Message {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            sender_nickname: "A".into(),
            meetup_id: Some(meetup_id),
            recipient_id: None,
            body: "warmup at six".into(),
            created_at: Utc::now(),
        };

        assert_eq!(hub.publish_message(&message), 1);
        assert!(sub_rx.try_recv().is_ok());
        assert!(unsub_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unregister_drops_subscriptions() {
        let hub = hub();
        let user = Uuid::new_v4();
        let (conn, _rx) = hub.register(user, "A".into());
        hub.subscribe(names::direct_messages(user), conn.id);

        hub.unregister(conn.id);

        let message = direct_message(Uuid::new_v4(), user);
        assert_eq!(hub.publish_message(&message), 0);
        assert_eq!(hub.connection_count(), 0);
    }
}

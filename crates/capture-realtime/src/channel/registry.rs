//! Channel registry — manages all channels and subscriptions.

use dashmap::DashMap;

use crate::connection::handle::ConnectionId;

use super::subscription::SubscriptionTracker;
use super::topic::Topic;

/// Registry of all active pub/sub channels.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    /// Channel name → topic.
    channels: DashMap<String, Topic>,
    /// Subscription tracker (reverse index).
    subscriptions: SubscriptionTracker,
}

impl ChannelRegistry {
    /// Creates a new channel registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a connection to a channel.
    pub fn subscribe(&self, channel_name: String, conn_id: ConnectionId) {
        self.channels
            .entry(channel_name.clone())
            .or_insert_with(|| Topic::new(channel_name.clone()))
            .subscribe(conn_id);

        self.subscriptions.add(conn_id, channel_name);
    }

    /// Unsubscribes a connection from a channel.
    pub fn unsubscribe(&self, channel_name: &str, conn_id: ConnectionId) {
        if let Some(mut channel) = self.channels.get_mut(channel_name) {
            channel.unsubscribe(conn_id);
            if channel.is_empty() {
                drop(channel);
                self.channels.remove(channel_name);
            }
        }
        self.subscriptions.remove(conn_id, channel_name);
    }

    /// Unsubscribes a connection from all channels.
    pub fn unsubscribe_all(&self, conn_id: ConnectionId) {
        let channels = self.subscriptions.remove_all(conn_id);
        for channel_name in &channels {
            if let Some(mut channel) = self.channels.get_mut(channel_name) {
                channel.unsubscribe(conn_id);
                if channel.is_empty() {
                    drop(channel);
                    self.channels.remove(channel_name);
                }
            }
        }
    }

    /// Returns all subscriber connection IDs for a channel.
    pub fn subscribers(&self, channel_name: &str) -> Vec<ConnectionId> {
        self.channels
            .get(channel_name)
            .map(|ch| ch.subscriber_ids())
            .unwrap_or_default()
    }

    /// Returns total number of active channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let registry = ChannelRegistry::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        registry.subscribe("meetup:x".into(), a);
        registry.subscribe("meetup:x".into(), b);
        assert_eq!(registry.subscribers("meetup:x").len(), 2);

        registry.unsubscribe("meetup:x", a);
        assert_eq!(registry.subscribers("meetup:x"), vec![b]);

        // Empty channels are dropped from the registry.
        registry.unsubscribe("meetup:x", b);
        assert_eq!(registry.channel_count(), 0);
    }

    #[test]
    fn test_unsubscribe_all() {
        let registry = ChannelRegistry::new();
        let conn = Uuid::new_v4();

        registry.subscribe("meetup:x".into(), conn);
        registry.subscribe("dm:y".into(), conn);
        registry.unsubscribe_all(conn);

        assert!(registry.subscribers("meetup:x").is_empty());
        assert!(registry.subscribers("dm:y").is_empty());
        assert_eq!(registry.channel_count(), 0);
    }
}

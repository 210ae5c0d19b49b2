//! Reverse index from connections to their channel subscriptions.

use dashmap::DashMap;

use crate::connection::handle::ConnectionId;

/// Tracks which channels each connection is subscribed to, so teardown
/// can unsubscribe everything without scanning all channels.
#[derive(Debug, Default)]
pub struct SubscriptionTracker {
    by_connection: DashMap<ConnectionId, Vec<String>>,
}

impl SubscriptionTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a subscription.
    pub fn add(&self, conn_id: ConnectionId, channel: String) {
        let mut entry = self.by_connection.entry(conn_id).or_default();
        if !entry.contains(&channel) {
            entry.push(channel);
        }
    }

    /// Removes a single subscription.
    pub fn remove(&self, conn_id: ConnectionId, channel: &str) {
        if let Some(mut entry) = self.by_connection.get_mut(&conn_id) {
            entry.retain(|c| c != channel);
        }
    }

    /// Removes and returns all subscriptions for a connection.
    pub fn remove_all(&self, conn_id: ConnectionId) -> Vec<String> {
        self.by_connection
            .remove(&conn_id)
            .map(|(_, channels)| channels)
            .unwrap_or_default()
    }

    /// Returns the subscription count for a connection.
    pub fn count(&self, conn_id: ConnectionId) -> usize {
        self.by_connection
            .get(&conn_id)
            .map(|c| c.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_add_remove_all() {
        let tracker = SubscriptionTracker::new();
        let conn = Uuid::new_v4();

        tracker.add(conn, "meetup:a".into());
        tracker.add(conn, "meetup:a".into());
        tracker.add(conn, "dm:b".into());
        assert_eq!(tracker.count(conn), 2);

        let removed = tracker.remove_all(conn);
        assert_eq!(removed.len(), 2);
        assert_eq!(tracker.count(conn), 0);
    }
}

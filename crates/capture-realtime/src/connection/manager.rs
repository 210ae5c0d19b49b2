//! Connection manager — lifecycle of WebSocket connections.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use capture_core::config::RealtimeConfig;

use crate::channel::registry::ChannelRegistry;
use crate::message::envelope::MessageEnvelope;

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Manages all active WebSocket connections.
#[derive(Debug)]
pub struct ConnectionManager {
    pool: ConnectionPool,
    channels: Arc<ChannelRegistry>,
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig, channels: Arc<ChannelRegistry>) -> Self {
        Self {
            pool: ConnectionPool::new(),
            channels,
            config,
        }
    }

    /// Registers a new authenticated connection.
    ///
    /// Returns the handle and the receiver the socket task drains.
    pub fn register(
        &self,
        user_id: Uuid,
        nickname: String,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<MessageEnvelope>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(
            user_id,
            nickname,
            tx,
            self.config.dedup_window_size,
        ));

        self.pool.insert(Arc::clone(&handle));
        info!(
            connection_id = %handle.id,
            user_id = %user_id,
            total = self.pool.len(),
            "WebSocket connection registered"
        );

        (handle, rx)
    }

    /// Removes a connection and drops all its subscriptions.
    pub fn unregister(&self, conn_id: ConnectionId) {
        self.channels.unsubscribe_all(conn_id);
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_dead();
            info!(
                connection_id = %conn_id,
                user_id = %handle.user_id,
                total = self.pool.len(),
                "WebSocket connection closed"
            );
        }
    }

    /// Looks up a live connection.
    pub fn get(&self, conn_id: ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.pool.get(conn_id)
    }

    /// Delivers an envelope to every subscriber of a channel.
    ///
    /// Returns the number of connections the envelope was queued on.
    pub fn broadcast(&self, channel: &str, envelope: &MessageEnvelope) -> usize {
        let mut delivered = 0;
        for conn_id in self.channels.subscribers(channel) {
            if let Some(handle) = self.pool.get(conn_id) {
                if handle.send(envelope.clone()) {
                    delivered += 1;
                }
            }
        }
        debug!(channel = %channel, delivered, "Broadcast envelope");
        delivered
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.pool.len()
    }
}

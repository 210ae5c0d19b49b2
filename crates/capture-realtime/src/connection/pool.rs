//! Pool of active connection handles.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use super::handle::{ConnectionHandle, ConnectionId};

/// All live connections, indexed by connection ID and by user.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    by_user: DashMap<Uuid, Vec<ConnectionId>>,
}

impl ConnectionPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection.
    pub fn insert(&self, handle: Arc<ConnectionHandle>) {
        self.by_user
            .entry(handle.user_id)
            .or_default()
            .push(handle.id);
        self.by_id.insert(handle.id, handle);
    }

    /// Removes a connection, returning its handle if it existed.
    ///
    /// The user's index entry goes away with their last connection, so
    /// the map never accumulates entries for departed users.
    pub fn remove(&self, conn_id: ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.by_id.remove(&conn_id)?;
        if let Entry::Occupied(mut entry) = self.by_user.entry(handle.user_id) {
            entry.get_mut().retain(|id| *id != conn_id);
            if entry.get().is_empty() {
                entry.remove();
            }
        }
        Some(handle)
    }

    /// Looks up a connection by ID.
    pub fn get(&self, conn_id: ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.by_id.get(&conn_id).map(|h| Arc::clone(&h))
    }

    /// All connections belonging to a user.
    pub fn user_connections(&self, user_id: Uuid) -> Vec<Arc<ConnectionHandle>> {
        self.by_user
            .get(&user_id)
            .map(|ids| ids.iter().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    /// Total live connection count.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn handle(user_id: Uuid) -> Arc<ConnectionHandle> {
        let (tx, _rx) = mpsc::channel(4);
        Arc::new(ConnectionHandle::new(user_id, "tester".into(), tx, 8))
    }

    #[test]
    fn test_remove_drops_empty_user_entry() {
        let pool = ConnectionPool::new();
        let user = Uuid::new_v4();
        let conn = handle(user);
        pool.insert(Arc::clone(&conn));

        assert!(pool.remove(conn.id).is_some());
        assert!(pool.is_empty());
        assert!(!pool.by_user.contains_key(&user));
    }

    #[test]
    fn test_user_entry_survives_while_other_connections_remain() {
        let pool = ConnectionPool::new();
        let user = Uuid::new_v4();
        let first = handle(user);
        let second = handle(user);
        pool.insert(Arc::clone(&first));
        pool.insert(Arc::clone(&second));

        pool.remove(first.id);
        assert!(pool.by_user.contains_key(&user));
        assert_eq!(pool.user_connections(user).len(), 1);

        pool.remove(second.id);
        assert!(!pool.by_user.contains_key(&user));
    }
}

//! Per-connection delivery deduplication.

use std::collections::{HashSet, VecDeque};

use uuid::Uuid;

/// A bounded sliding window of recently delivered message IDs.
///
/// Each connection keeps one: a chat message can reach the same socket
/// twice, once as the HTTP send response echoed back by the client's own
/// optimistic insert and once through the channel fanout. Recording the
/// persisted message ID here suppresses the second delivery.
#[derive(Debug)]
pub struct DedupWindow {
    capacity: usize,
    order: VecDeque<Uuid>,
    seen: HashSet<Uuid>,
}

impl DedupWindow {
    /// Creates a window remembering the last `capacity` IDs.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            order: VecDeque::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Records an ID. Returns false when it was already in the window,
    /// meaning the delivery should be suppressed.
    pub fn insert(&mut self, id: Uuid) -> bool {
        if self.seen.contains(&id) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.seen.remove(&evicted);
            }
        }
        self.order.push_back(id);
        self.seen.insert(id);
        true
    }

    /// Current number of remembered IDs.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_is_suppressed() {
        let mut window = DedupWindow::new(8);
        let id = Uuid::new_v4();

        assert!(window.insert(id));
        assert!(!window.insert(id));
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_eviction_frees_old_ids() {
        let mut window = DedupWindow::new(2);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        assert!(window.insert(a));
        assert!(window.insert(b));
        assert!(window.insert(c)); // evicts a
        assert_eq!(window.len(), 2);

        // a fell out of the window, so it counts as new again.
        assert!(window.insert(a));
        assert!(!window.insert(c));
    }

    #[test]
    fn test_zero_capacity_still_works() {
        let mut window = DedupWindow::new(0);
        let id = Uuid::new_v4();
        assert!(window.insert(id));
        assert!(!window.insert(id));
    }
}

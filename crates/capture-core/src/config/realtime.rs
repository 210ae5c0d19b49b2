//! Real-time WebSocket configuration.

use serde::{Deserialize, Serialize};

/// Real-time push configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Per-connection outbound message buffer size.
    #[serde(default = "default_buffer")]
    pub channel_buffer_size: usize,
    /// Number of recently delivered message IDs each connection remembers
    /// for duplicate suppression.
    #[serde(default = "default_dedup_window")]
    pub dedup_window_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_buffer(),
            dedup_window_size: default_dedup_window(),
        }
    }
}

fn default_buffer() -> usize {
    256
}

fn default_dedup_window() -> usize {
    512
}

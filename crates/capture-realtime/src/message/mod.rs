//! WebSocket message types, framing, and delivery deduplication.

pub mod dedup;
pub mod envelope;
pub mod types;

pub use dedup::DedupWindow;
pub use envelope::MessageEnvelope;
pub use types::{InboundMessage, OutboundMessage};

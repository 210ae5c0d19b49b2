//! # capture-realtime
//!
//! WebSocket realtime engine for Capture Now. Meetup chat threads and
//! direct-message feeds are pub/sub channels; sending a message through
//! the chat service publishes an insert event to every subscribed
//! connection. Delivery is per-connection deduplicated by message ID, so
//! a client that is both the optimistic sender and a channel subscriber
//! renders each message exactly once.

pub mod channel;
pub mod connection;
pub mod hub;
pub mod message;

pub use hub::RealtimeHub;

//! Meetup chat and direct messages.

pub mod conversations;
pub mod service;

pub use conversations::group_conversations;
pub use service::ChatService;

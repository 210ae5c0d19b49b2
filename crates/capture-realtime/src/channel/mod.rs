//! Pub/sub channels and the registry tracking their subscribers.

pub mod names;
pub mod registry;
pub mod subscription;
pub mod topic;

pub use registry::ChannelRegistry;

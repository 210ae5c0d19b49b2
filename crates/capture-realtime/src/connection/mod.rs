//! Connection handles and lifecycle management.

pub mod handle;
pub mod manager;
pub mod pool;

pub use handle::{ConnectionHandle, ConnectionId};
pub use manager::ConnectionManager;

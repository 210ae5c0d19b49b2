//! User profile, follow graph, and account lifecycle.

pub mod service;

pub use service::{UserProfile, UserService};

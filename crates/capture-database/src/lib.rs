//! # capture-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all Capture Now entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;

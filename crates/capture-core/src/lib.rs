//! # capture-core
//!
//! Core crate for the Capture Now server. Contains configuration schemas,
//! typed identifiers, pagination and geo types, the cache provider trait,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Capture Now crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

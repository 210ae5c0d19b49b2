//! # capture-cache
//!
//! Cache provider implementations for Capture Now. The only backend is an
//! in-process cache built on [moka](https://crates.io/crates/moka); the
//! [`CacheProvider`](capture_core::traits::CacheProvider) trait leaves
//! room for an external backend without touching call sites.
//!
//! Everything cached here is a best-effort accelerator (profiles, token
//! blocklist entries); the database rows stay authoritative.

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::CacheManager;

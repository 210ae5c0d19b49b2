//! # capture-entity
//!
//! Domain entity models for Capture Now. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod highlight;
pub mod meetup;
pub mod message;
pub mod notification;
pub mod user;

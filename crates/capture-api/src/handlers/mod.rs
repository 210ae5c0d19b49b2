//! HTTP and WebSocket request handlers.

pub mod auth;
pub mod chat;
pub mod health;
pub mod highlight;
pub mod meetup;
pub mod notification;
pub mod user;
pub mod ws;

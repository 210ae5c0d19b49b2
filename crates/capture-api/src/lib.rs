//! # capture-api
//!
//! HTTP and WebSocket API layer for Capture Now, built on Axum. Handlers
//! stay thin: they parse the request, call into the service layer with an
//! authenticated [`RequestContext`](capture_service::RequestContext), and
//! wrap the result in the standard response envelope.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;

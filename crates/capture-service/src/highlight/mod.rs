//! Highlight feed and interactions.

pub mod service;

pub use service::HighlightService;

//! Meetup sessions: listing, lifecycle, and feedback.

pub mod list;
pub mod rules;
pub mod service;

pub use list::{build_summary, rank_sessions, SessionFilter};
pub use service::MeetupService;

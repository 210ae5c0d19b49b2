//! Presentation helpers shared by API responses.

pub mod time;

//! Highlight (media post) domain entities.

pub mod comment;
pub mod model;

pub use comment::HighlightComment;
pub use model::{Highlight, HighlightCard, MediaKind};

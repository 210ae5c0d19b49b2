//! Meetup session domain entities.

pub mod feedback;
pub mod model;
pub mod status;
pub mod summary;

pub use feedback::{FeedbackSubmission, MeetupFeedback};
pub use model::{CreateMeetup, Meetup, MeetupParticipant};
pub use status::MeetupStatus;
pub use summary::SessionSummary;

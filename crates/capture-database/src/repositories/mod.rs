//! Repository implementations for all Capture Now entities.

pub mod follow;
pub mod highlight;
pub mod meetup;
pub mod message;
pub mod user;
pub mod watermark;

pub use follow::FollowRepository;
pub use highlight::HighlightRepository;
pub use meetup::MeetupRepository;
pub use message::MessageRepository;
pub use user::UserRepository;
pub use watermark::WatermarkRepository;

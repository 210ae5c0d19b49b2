//! # capture-service
//!
//! Business logic service layer for Capture Now. Each service
//! orchestrates repositories, the cache, media storage, authentication,
//! and the realtime hub to implement application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod chat;
pub mod context;
pub mod highlight;
pub mod meetup;
pub mod notification;
pub mod user;
pub mod viewmodel;

pub use auth::{AuthService, OAuthClient};
pub use chat::ChatService;
pub use context::RequestContext;
pub use highlight::HighlightService;
pub use meetup::{MeetupService, SessionFilter};
pub use notification::NotificationService;
pub use user::UserService;

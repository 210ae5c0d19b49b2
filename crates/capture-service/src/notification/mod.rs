//! The aggregated notification feed.

pub mod aggregator;
pub mod service;

pub use aggregator::{aggregate, reminder_window, NotificationSources, ReminderWindow};
pub use service::NotificationService;

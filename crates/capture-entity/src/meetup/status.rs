//! Meetup status enumeration.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a meetup session.
///
/// The only transition is `Recruiting -> Finished`, performed when the
/// host closes the session through the feedback flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "meetup_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MeetupStatus {
    /// Open for participants to join.
    Recruiting,
    /// Closed by the host; feedback has been collected.
    Finished,
}

impl MeetupStatus {
    /// Return the status as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recruiting => "recruiting",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for MeetupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Pure construction of the notification feed from its four sources.
//!
//! Nothing here touches the database: the service fetches raw rows and
//! the aggregator turns them into ordered, read-stamped items. Reminder
//! and feedback items are re-derived on every load, which is what lets a
//! session drift from the "12 hours" window into the "1 hour" window
//! without any stored notification rows.

use chrono::{DateTime, Duration, Utc};

use capture_entity::notification::item::{NotificationItem, NotificationKind};
use capture_entity::notification::source::{CommentEvent, JoinedMeetup, LikeEvent};

use crate::viewmodel::time::relative_time;

/// The reminder windows, nearest first. A session start falls into at
/// most one: the first whose half-open interval (lower, upper] contains
/// the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderWindow {
    /// Starts within roughly one hour.
    OneHour,
    /// Starts within roughly six hours.
    SixHours,
    /// Starts within roughly twelve hours.
    TwelveHours,
    /// Starts within roughly a day.
    TwentyFourHours,
}

impl ReminderWindow {
    /// The (lower, upper] bounds in hours before start.
    fn bounds(&self) -> (f64, f64) {
        match self {
            Self::OneHour => (0.0, 1.1),
            Self::SixHours => (5.0, 6.1),
            Self::TwelveHours => (11.0, 12.5),
            Self::TwentyFourHours => (23.0, 24.5),
        }
    }

    /// Display label for the notification body.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OneHour => "1 hour",
            Self::SixHours => "6 hours",
            Self::TwelveHours => "12 hours",
            Self::TwentyFourHours => "24 hours / tomorrow",
        }
    }

    const ALL: [ReminderWindow; 4] = [
        Self::OneHour,
        Self::SixHours,
        Self::TwelveHours,
        Self::TwentyFourHours,
    ];
}

/// The reminder window containing `hours_until_start`, if any.
///
/// Windows are checked nearest-first and intervals are half-open, so
/// exactly 5.0 hours out matches nothing while 6.1 matches "6 hours".
pub fn reminder_window(hours_until_start: f64) -> Option<ReminderWindow> {
    ReminderWindow::ALL.into_iter().find(|window| {
        let (lower, upper) = window.bounds();
        hours_until_start > lower && hours_until_start <= upper
    })
}

/// Raw rows the feed is built from, one field per source.
#[derive(Debug, Clone, Default)]
pub struct NotificationSources {
    /// Likes on the viewer's highlights.
    pub likes: Vec<LikeEvent>,
    /// Comments on the viewer's highlights.
    pub comments: Vec<CommentEvent>,
    /// Sessions the viewer has joined, for reminders and feedback
    /// prompts alike.
    pub joined: Vec<JoinedMeetup>,
}

/// Builds the merged feed: all four sources, newest first, read flags
/// derived from the watermark.
pub fn aggregate(
    sources: NotificationSources,
    now: DateTime<Utc>,
    watermark: Option<DateTime<Utc>>,
) -> Vec<NotificationItem> {
    let mut items = Vec::new();

    for like in sources.likes {
        items.push(NotificationItem {
            id: format!(
                "like-{}-{}-{}",
                like.highlight_id,
                like.liker_id,
                like.created_at.timestamp()
            ),
            kind: NotificationKind::Like,
            title: "New like".to_string(),
            message: format!("{} liked your highlight", like.liker_nickname),
            timestamp: like.created_at,
            display_time: String::new(),
            target_link: format!("/highlights/{}", like.highlight_id),
            is_read: false,
        });
    }

    for comment in sources.comments {
        items.push(NotificationItem {
            id: format!("comment-{}", comment.comment_id),
            kind: NotificationKind::Comment,
            title: "New comment".to_string(),
            message: format!(
                "{} commented: {}",
                comment.commenter_nickname,
                truncate(&comment.body, 80)
            ),
            timestamp: comment.created_at,
            display_time: String::new(),
            target_link: format!("/highlights/{}", comment.highlight_id),
            is_read: false,
        });
    }

    for meetup in &sources.joined {
        let hours_until = (meetup.starts_at - now).num_seconds() as f64 / 3600.0;
        if let Some(window) = reminder_window(hours_until) {
            let (_, upper) = window.bounds();
            // Anchor the item to the moment its window opened, so the
            // watermark can mark it read like any other event.
            let window_opened =
                meetup.starts_at - Duration::seconds((upper * 3600.0).round() as i64);
            items.push(NotificationItem {
                id: format!("reminder-{}-{}", meetup.meetup_id, window.label()),
                kind: NotificationKind::Reminder,
                title: "Session starting soon".to_string(),
                message: format!("\"{}\" starts in about {}", meetup.title, window.label()),
                timestamp: window_opened,
                display_time: String::new(),
                target_link: format!("/meetups/{}", meetup.meetup_id),
                is_read: false,
            });
        }
    }

    for meetup in &sources.joined {
        if meetup.ends_at < now && !meetup.feedback_given {
            items.push(NotificationItem {
                id: format!("feedback-{}", meetup.meetup_id),
                kind: NotificationKind::FeedbackDue,
                title: "How was your session?".to_string(),
                message: format!("Leave feedback for \"{}\"", meetup.title),
                timestamp: meetup.ends_at,
                display_time: String::new(),
                target_link: format!("/meetups/{}/feedback", meetup.meetup_id),
                is_read: false,
            });
        }
    }

    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    for item in &mut items {
        item.is_read = watermark.is_some_and(|mark| item.timestamp <= mark);
        item.display_time = relative_time(item.timestamp, now);
    }

    items
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn like(minutes_ago: i64) -> LikeEvent {
        LikeEvent {
            highlight_id: Uuid::new_v4(),
            highlight_caption: "clean ace".into(),
            liker_id: Uuid::new_v4(),
            liker_nickname: "Aki".into(),
            created_at: now() - Duration::minutes(minutes_ago),
        }
    }

    fn comment(minutes_ago: i64, body: &str) -> CommentEvent {
        CommentEvent {
            comment_id: Uuid::new_v4(),
            highlight_id: Uuid::new_v4(),
            commenter_id: Uuid::new_v4(),
            commenter_nickname: "Ren".into(),
            body: body.into(),
            created_at: now() - Duration::minutes(minutes_ago),
        }
    }

    fn joined(starts_in_hours: f64, ended_hours_ago: Option<i64>, feedback_given: bool) -> JoinedMeetup {
        let starts_at = now() + Duration::seconds((starts_in_hours * 3600.0) as i64);
        let ends_at = match ended_hours_ago {
            Some(h) => now() - Duration::hours(h),
            None => starts_at + Duration::hours(2),
        };
        JoinedMeetup {
            meetup_id: Uuid::new_v4(),
            title: "Evening futsal".into(),
            starts_at,
            ends_at,
            feedback_given,
        }
    }

    #[test]
    fn test_reminder_window_boundaries() {
        assert_eq!(reminder_window(0.5), Some(ReminderWindow::OneHour));
        assert_eq!(reminder_window(1.1), Some(ReminderWindow::OneHour));
        assert_eq!(reminder_window(1.2), None);
        assert_eq!(reminder_window(5.0), None);
        assert_eq!(reminder_window(5.5), Some(ReminderWindow::SixHours));
        assert_eq!(reminder_window(6.1), Some(ReminderWindow::SixHours));
        assert_eq!(reminder_window(12.5), Some(ReminderWindow::TwelveHours));
        assert_eq!(reminder_window(12.6), None);
        assert_eq!(reminder_window(24.5), Some(ReminderWindow::TwentyFourHours));
        assert_eq!(reminder_window(24.6), None);
        assert_eq!(reminder_window(0.0), None);
        assert_eq!(reminder_window(-1.0), None);
    }

    #[test]
    fn test_reminder_window_labels() {
        assert_eq!(ReminderWindow::OneHour.label(), "1 hour");
        assert_eq!(ReminderWindow::SixHours.label(), "6 hours");
        assert_eq!(ReminderWindow::TwelveHours.label(), "12 hours");
        assert_eq!(ReminderWindow::TwentyFourHours.label(), "24 hours / tomorrow");
    }

    #[test]
    fn test_items_merge_newest_first() {
        let sources = NotificationSources {
            likes: vec![like(30)],
            comments: vec![comment(10, "nice one"), comment(50, "where was this?")],
            joined: vec![],
        };

        let items = aggregate(sources, now(), None);
        assert_eq!(items.len(), 3);
        assert!(items.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert_eq!(items[0].kind, NotificationKind::Comment);
        assert_eq!(items[1].kind, NotificationKind::Like);
    }

    #[test]
    fn test_watermark_splits_read_from_unread() {
        let sources = NotificationSources {
            likes: vec![like(30), like(5)],
            comments: vec![],
            joined: vec![],
        };

        let watermark = now() - Duration::minutes(10);
        let items = aggregate(sources, now(), Some(watermark));

        assert!(!items[0].is_read, "newer than watermark stays unread");
        assert!(items[1].is_read, "older than watermark is read");
    }

    #[test]
    fn test_no_watermark_means_everything_unread() {
        let items = aggregate(
            NotificationSources {
                likes: vec![like(30)],
                ..Default::default()
            },
            now(),
            None,
        );
        assert!(!items[0].is_read);
    }

    #[test]
    fn test_reminder_emitted_per_load() {
        let sources = NotificationSources {
            joined: vec![joined(0.9, None, false)],
            ..Default::default()
        };
        let items = aggregate(sources.clone(), now(), None);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, NotificationKind::Reminder);
        assert!(items[0].message.contains("1 hour"));

        // Re-evaluated against a later clock: window gone, item gone.
        let later = now() + Duration::hours(2);
        assert!(aggregate(sources, later, None)
            .iter()
            .all(|i| i.kind != NotificationKind::Reminder));
    }

    #[test]
    fn test_reminder_timestamp_is_in_the_past() {
        let items = aggregate(
            NotificationSources {
                joined: vec![joined(0.9, None, false)],
                ..Default::default()
            },
            now(),
            None,
        );
        // Anchored to the window opening, so advancing the watermark to
        // now marks it read on the next load.
        assert!(items[0].timestamp <= now());
        assert!(aggregate(
            NotificationSources {
                joined: vec![joined(0.9, None, false)],
                ..Default::default()
            },
            now(),
            Some(now()),
        )[0]
        .is_read);
    }

    #[test]
    fn test_feedback_due_until_feedback_given() {
        let pending = NotificationSources {
            joined: vec![joined(-3.0, Some(1), false)],
            ..Default::default()
        };
        let items = aggregate(pending, now(), None);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, NotificationKind::FeedbackDue);

        let done = NotificationSources {
            joined: vec![joined(-3.0, Some(1), true)],
            ..Default::default()
        };
        assert!(aggregate(done, now(), None).is_empty());
    }

    #[test]
    fn test_long_comment_is_truncated() {
        let body = "a".repeat(200);
        let items = aggregate(
            NotificationSources {
                comments: vec![comment(1, &body)],
                ..Default::default()
            },
            now(),
            None,
        );
        assert!(items[0].message.ends_with('…'));
        assert!(items[0].message.chars().count() < 120);
    }
}

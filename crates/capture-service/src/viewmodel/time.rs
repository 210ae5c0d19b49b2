//! Timestamp formatting for list surfaces.

use chrono::{DateTime, Utc};

/// Relative display time for notification and chat rows.
///
/// Falls back to an absolute date once the event is more than a week
/// old, so old rows stay stable instead of counting up forever.
pub fn relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(ts);
    let seconds = delta.num_seconds();

    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = delta.num_minutes();
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = delta.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = delta.num_days();
    if days < 7 {
        return format!("{days}d ago");
    }
    ts.format("%Y-%m-%d").to_string()
}

/// Absolute timestamp shown on meetup detail and feedback screens.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = now();
        assert_eq!(relative_time(now - Duration::seconds(10), now), "just now");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3h ago");
        assert_eq!(relative_time(now - Duration::days(2), now), "2d ago");
        assert_eq!(relative_time(now - Duration::days(10), now), "2025-06-05");
    }

    #[test]
    fn test_boundaries() {
        let now = now();
        assert_eq!(relative_time(now - Duration::seconds(59), now), "just now");
        assert_eq!(relative_time(now - Duration::seconds(60), now), "1m ago");
        assert_eq!(relative_time(now - Duration::minutes(59), now), "59m ago");
        assert_eq!(relative_time(now - Duration::hours(24), now), "1d ago");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(now()), "2025-06-15 12:00");
    }

    #[test]
    fn test_format_timestamp_parses_back_at_minute_precision() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 15, 12, 34, 56).unwrap();
        let parsed = chrono::NaiveDateTime::parse_from_str(&format_timestamp(ts), "%Y-%m-%d %H:%M")
            .unwrap()
            .and_utc();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 6, 15, 12, 34, 0).unwrap());
    }
}

//! Session list construction: summaries, filtering, and ranking.
//!
//! Everything here is pure. The service fetches rows, then this module
//! turns them into the viewer's list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use capture_core::types::geo::{format_distance_km, Coordinates, DistanceBucket};
use capture_database::repositories::meetup::MeetupWithHost;
use capture_entity::meetup::status::MeetupStatus;
use capture_entity::meetup::summary::SessionSummary;

/// Viewer-chosen filters, AND-combined: a session appears only when it
/// passes every set field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionFilter {
    /// Case-insensitive substring matched against title, host nickname,
    /// location name, and sport.
    pub query: Option<String>,
    /// Keep only this sport.
    pub sport: Option<String>,
    /// Keep only this skill level. The value "Any" passes every level.
    pub level: Option<String>,
    /// Case-insensitive substring matched against the host nickname.
    pub host: Option<String>,
    /// Keep only sessions whose distance falls in this bucket. Sessions
    /// with no computable distance are dropped when this is set.
    pub distance: Option<DistanceBucket>,
    /// Keep only sessions still accepting participants.
    #[serde(default)]
    pub open_only: bool,
}

impl SessionFilter {
    /// Whether the filter passes everything through.
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.sport.is_none()
            && self.level.is_none()
            && self.host.is_none()
            && self.distance.is_none()
            && !self.open_only
    }

    /// Whether a session passes every set field.
    ///
    /// Finished sessions never pass, regardless of filters: the list
    /// only shows sessions the feedback flow has not closed out yet.
    pub fn matches(&self, session: &SessionSummary) -> bool {
        if session.meetup.status == MeetupStatus::Finished {
            return false;
        }
        if let Some(ref query) = self.query {
            let needle = query.to_lowercase();
            let hit = [
                session.meetup.title.as_str(),
                session.host_nickname.as_str(),
                session.meetup.location_name.as_str(),
                session.meetup.sport.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(ref sport) = self.sport {
            if !session.meetup.sport.eq_ignore_ascii_case(sport) {
                return false;
            }
        }
        if let Some(ref level) = self.level {
            if !level.eq_ignore_ascii_case("any")
                && !session.meetup.level.eq_ignore_ascii_case(level)
            {
                return false;
            }
        }
        if let Some(ref host) = self.host {
            if !session
                .host_nickname
                .to_lowercase()
                .contains(&host.to_lowercase())
            {
                return false;
            }
        }
        if let Some(bucket) = self.distance {
            match session.distance_km {
                Some(km) if bucket.contains(km) => {}
                _ => return false,
            }
        }
        if self.open_only && !session.has_open_slot() {
            return false;
        }
        true
    }
}

/// Builds the viewer-specific summary for one meetup row.
pub fn build_summary(
    row: MeetupWithHost,
    participant_ids: Vec<Uuid>,
    viewer_id: Uuid,
    viewer_home: Option<Coordinates>,
) -> SessionSummary {
    let hosted_by_viewer = row.meetup.host_id == viewer_id;
    let joined_by_viewer = participant_ids.contains(&viewer_id);
    let joined_count = participant_ids.len() as i64;

    let distance_km = viewer_home
        .map(|home| home.distance_km(&Coordinates::new(row.meetup.lat, row.meetup.lng)));
    let distance_label = distance_km.map(format_distance_km);

    SessionSummary {
        meetup: row.meetup,
        host_nickname: row.host_nickname,
        participant_ids,
        joined_count,
        hosted_by_viewer,
        joined_by_viewer,
        distance_km,
        distance_label,
    }
}

/// Orders sessions into the four viewer tiers.
///
/// Hosted-and-ended sessions come first (they need the viewer's
/// attention for feedback), then hosted, then joined, then everything
/// else. Within each tier, sessions run by ascending start time.
pub fn rank_sessions(sessions: &mut [SessionSummary], now: DateTime<Utc>) {
    sessions.sort_by(|a, b| {
        tier(a, now)
            .cmp(&tier(b, now))
            .then(a.meetup.starts_at.cmp(&b.meetup.starts_at))
    });
}

fn tier(session: &SessionSummary, now: DateTime<Utc>) -> u8 {
    if session.hosted_and_ended(now) {
        0
    } else if session.hosted_by_viewer {
        1
    } else if session.joined_by_viewer {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use capture_entity::meetup::model::Meetup;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn meetup(host_id: Uuid, starts_in_hours: i64) -> MeetupWithHost {
        let starts_at = now() + Duration::hours(starts_in_hours);
        MeetupWithHost {
            meetup: Meetup {
                id: Uuid::new_v4(),
                host_id,
                title: "Morning run".into(),
                description: None,
                sport: "Running".into(),
                level: "Beginner".into(),
                location_name: "Riverside park".into(),
                lat: 35.6812,
                lng: 139.7671,
                starts_at,
                ends_at: starts_at + Duration::hours(2),
                capacity: 6,
                status: MeetupStatus::Recruiting,
                created_at: now(),
            },
            host_nickname: "Host".into(),
        }
    }

    fn summary(
        viewer: Uuid,
        host: Uuid,
        starts_in_hours: i64,
        participants: Vec<Uuid>,
    ) -> SessionSummary {
        build_summary(meetup(host, starts_in_hours), participants, viewer, None)
    }

    #[test]
    fn test_summary_flags_and_count() {
        let viewer = Uuid::new_v4();
        let other = Uuid::new_v4();

        let s = summary(viewer, viewer, 2, vec![viewer, other]);
        assert!(s.hosted_by_viewer);
        assert!(s.joined_by_viewer);
        assert_eq!(s.joined_count, 2);

        let s = summary(viewer, other, 2, vec![other]);
        assert!(!s.hosted_by_viewer);
        assert!(!s.joined_by_viewer);
    }

    #[test]
    fn test_summary_distance_from_home() {
        let viewer = Uuid::new_v4();
        // Viewer at Shinjuku, meetup near Tokyo station — around 6 km.
        let home = Coordinates::new(35.6896, 139.6922);
        let s = build_summary(meetup(Uuid::new_v4(), 2), vec![], viewer, Some(home));

        let km = s.distance_km.unwrap();
        assert!((5.0..8.0).contains(&km), "unexpected distance {km}");
        assert!(s.distance_label.unwrap().ends_with("km"));

        let s = build_summary(meetup(Uuid::new_v4(), 2), vec![], viewer, None);
        assert!(s.distance_km.is_none());
        assert!(s.distance_label.is_none());
    }

    #[test]
    fn test_filters_are_and_combined() {
        let viewer = Uuid::new_v4();
        let s = summary(viewer, Uuid::new_v4(), 2, vec![]);

        assert!(SessionFilter::default().matches(&s));
        assert!(SessionFilter {
            sport: Some("running".into()),
            level: Some("BEGINNER".into()),
            ..Default::default()
        }
        .matches(&s));

        // One failing field rejects the session even if others pass.
        assert!(!SessionFilter {
            sport: Some("running".into()),
            level: Some("Advanced".into()),
            ..Default::default()
        }
        .matches(&s));
    }

    #[test]
    fn test_finished_sessions_never_listed() {
        let viewer = Uuid::new_v4();
        let mut s = summary(viewer, viewer, -5, vec![viewer]);
        s.meetup.status = MeetupStatus::Finished;

        // Even the viewer's own ended session drops out once feedback
        // has closed it.
        assert!(!SessionFilter::default().matches(&s));
    }

    #[test]
    fn test_query_filter_searches_text_fields() {
        let viewer = Uuid::new_v4();
        let s = summary(viewer, Uuid::new_v4(), 2, vec![]);

        let passing = ["morning", "RIVERSIDE", "run", "Host"];
        for q in passing {
            let filter = SessionFilter {
                query: Some(q.into()),
                ..Default::default()
            };
            assert!(filter.matches(&s), "query {q:?} should match");
        }

        let filter = SessionFilter {
            query: Some("tennis".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&s));
    }

    #[test]
    fn test_level_any_is_wildcard() {
        let viewer = Uuid::new_v4();
        let s = summary(viewer, Uuid::new_v4(), 2, vec![]);

        let filter = SessionFilter {
            level: Some("Any".into()),
            ..Default::default()
        };
        assert!(filter.matches(&s));
    }

    #[test]
    fn test_host_filter_is_substring() {
        let viewer = Uuid::new_v4();
        let s = summary(viewer, Uuid::new_v4(), 2, vec![]);

        let filter = SessionFilter {
            host: Some("hos".into()),
            ..Default::default()
        };
        assert!(filter.matches(&s));

        let filter = SessionFilter {
            host: Some("nobody".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&s));
    }

    #[test]
    fn test_distance_filter_drops_unknown_distance() {
        let viewer = Uuid::new_v4();
        let filter = SessionFilter {
            distance: Some(DistanceBucket::Under1),
            ..Default::default()
        };

        let no_home = summary(viewer, Uuid::new_v4(), 2, vec![]);
        assert!(no_home.distance_km.is_none());
        assert!(!filter.matches(&no_home));

        let near = build_summary(
            meetup(Uuid::new_v4(), 2),
            vec![],
            viewer,
            Some(Coordinates::new(35.6812, 139.7671)),
        );
        assert!(filter.matches(&near));
    }

    #[test]
    fn test_open_only_filter() {
        let viewer = Uuid::new_v4();
        let mut s = summary(viewer, Uuid::new_v4(), 2, vec![]);
        let filter = SessionFilter {
            open_only: true,
            ..Default::default()
        };
        assert!(filter.matches(&s));

        s.joined_count = s.meetup.capacity as i64;
        assert!(!filter.matches(&s));

        s.joined_count = 1;
        s.meetup.status = MeetupStatus::Finished;
        assert!(!filter.matches(&s));
    }

    #[test]
    fn test_rank_sessions_four_tiers() {
        let viewer = Uuid::new_v4();
        let other = Uuid::new_v4();

        let hosted_ended = summary(viewer, viewer, -5, vec![viewer]);
        let hosted_upcoming = summary(viewer, viewer, 4, vec![viewer]);
        let joined = summary(viewer, other, 1, vec![other, viewer]);
        let rest = summary(viewer, other, 2, vec![other]);

        let mut sessions = vec![
            rest.clone(),
            joined.clone(),
            hosted_upcoming.clone(),
            hosted_ended.clone(),
        ];
        rank_sessions(&mut sessions, now());

        assert_eq!(sessions[0].meetup.id, hosted_ended.meetup.id);
        assert_eq!(sessions[1].meetup.id, hosted_upcoming.meetup.id);
        assert_eq!(sessions[2].meetup.id, joined.meetup.id);
        assert_eq!(sessions[3].meetup.id, rest.meetup.id);
    }

    #[test]
    fn test_rank_sessions_ascending_start_within_tier() {
        let viewer = Uuid::new_v4();
        let other = Uuid::new_v4();

        let later = summary(viewer, other, 10, vec![other]);
        let sooner = summary(viewer, other, 1, vec![other]);
        let middle = summary(viewer, other, 5, vec![other]);

        let mut sessions = vec![later.clone(), sooner.clone(), middle.clone()];
        rank_sessions(&mut sessions, now());

        assert_eq!(sessions[0].meetup.id, sooner.meetup.id);
        assert_eq!(sessions[1].meetup.id, middle.meetup.id);
        assert_eq!(sessions[2].meetup.id, later.meetup.id);
    }
}

//! Admission rules for join, leave, and the feedback flow.
//!
//! The service gathers the facts (the meetup row, participation flags)
//! and these functions decide. Keeping the decisions pure keeps every
//! rejection path testable without a database.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use capture_core::error::AppError;
use capture_entity::meetup::feedback::FeedbackSubmission;
use capture_entity::meetup::model::Meetup;
use capture_entity::meetup::status::MeetupStatus;

/// Whether a user may attempt to join.
///
/// Capacity is not checked here: the participant insert re-checks it
/// against the live count, so a full session fails at the write.
pub fn ensure_can_join(
    meetup: &Meetup,
    already_joined: bool,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if meetup.status != MeetupStatus::Recruiting {
        return Err(AppError::conflict("This session is no longer recruiting"));
    }
    if meetup.has_ended(now) {
        return Err(AppError::conflict("This session has already ended"));
    }
    if already_joined {
        return Err(AppError::conflict("Already joined this session"));
    }
    Ok(())
}

/// Whether a user may leave. The host can never leave their own
/// session; they delete it instead, and the check lives here rather
/// than in any client.
pub fn ensure_can_leave(meetup: &Meetup, user_id: Uuid) -> Result<(), AppError> {
    if meetup.host_id == user_id {
        return Err(AppError::forbidden(
            "The host cannot leave their own session; delete it instead",
        ));
    }
    Ok(())
}

/// Whether the feedback prompt is open for this user: they joined the
/// session, the session is over, and they have not responded yet. A
/// prior response of either kind, a real submission or the zero-rating
/// skip marker, closes the prompt for good.
pub fn ensure_feedback_open(
    meetup: &Meetup,
    is_participant: bool,
    already_responded: bool,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if !is_participant {
        return Err(AppError::forbidden(
            "Only participants can give feedback on a session",
        ));
    }
    if !meetup.has_ended(now) {
        return Err(AppError::conflict("This session has not ended yet"));
    }
    if already_responded {
        return Err(AppError::conflict("Feedback already submitted"));
    }
    Ok(())
}

/// Validates a real feedback submission: the rating is in range and
/// each badge vote names another participant.
pub fn validate_feedback(
    data: &FeedbackSubmission,
    voter_id: Uuid,
    participant_ids: &[Uuid],
) -> Result<(), AppError> {
    if !(1..=5).contains(&data.rating) {
        return Err(AppError::validation("Rating must be between 1 and 5"));
    }

    for (label, vote) in [
        ("Star player", data.star_user_id),
        ("Manner", data.manner_user_id),
    ] {
        if let Some(candidate) = vote {
            if candidate == voter_id {
                return Err(AppError::validation(format!(
                    "{label} vote cannot go to yourself"
                )));
            }
            if !participant_ids.contains(&candidate) {
                return Err(AppError::validation(format!(
                    "{label} vote must go to a session participant"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture_core::error::ErrorKind;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn meetup(host_id: Uuid, ends_in_hours: i64) -> Meetup {
        let ends_at = now() + Duration::hours(ends_in_hours);
        Meetup {
            id: Uuid::new_v4(),
            host_id,
            title: "Evening futsal".into(),
            description: None,
            sport: "Futsal".into(),
            level: "Intermediate".into(),
            location_name: "City gym".into(),
            lat: 35.6812,
            lng: 139.7671,
            starts_at: ends_at - Duration::hours(2),
            ends_at,
            capacity: 10,
            status: MeetupStatus::Recruiting,
            created_at: now() - Duration::days(1),
        }
    }

    #[test]
    fn test_join_requires_recruiting_and_open_session() {
        let m = meetup(Uuid::new_v4(), 3);
        assert!(ensure_can_join(&m, false, now()).is_ok());

        let mut finished = m.clone();
        finished.status = MeetupStatus::Finished;
        let err = ensure_can_join(&finished, false, now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let ended = meetup(Uuid::new_v4(), -1);
        let err = ensure_can_join(&ended, false, now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_join_rejects_a_second_enrollment() {
        let m = meetup(Uuid::new_v4(), 3);
        let err = ensure_can_join(&m, true, now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(err.message.contains("Already joined"));
    }

    #[test]
    fn test_host_cannot_leave_own_session() {
        let host = Uuid::new_v4();
        let m = meetup(host, 3);

        let err = ensure_can_leave(&m, host).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        assert!(ensure_can_leave(&m, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_feedback_opens_only_after_the_session_ends() {
        let running = meetup(Uuid::new_v4(), 2);
        let err = ensure_feedback_open(&running, true, false, now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let ended = meetup(Uuid::new_v4(), -2);
        assert!(ensure_feedback_open(&ended, true, false, now()).is_ok());
    }

    #[test]
    fn test_feedback_requires_participation() {
        let ended = meetup(Uuid::new_v4(), -2);
        let err = ensure_feedback_open(&ended, false, false, now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_any_prior_response_closes_the_prompt() {
        // A skip writes a zero-rating row, which counts as a response
        // just like a real submission does.
        let ended = meetup(Uuid::new_v4(), -2);
        let err = ensure_feedback_open(&ended, true, true, now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(err.message.contains("already submitted"));
    }

    #[test]
    fn test_feedback_rating_range() {
        let voter = Uuid::new_v4();
        let mut data = FeedbackSubmission {
            star_user_id: None,
            manner_user_id: None,
            rating: 5,
            comment: None,
        };
        assert!(validate_feedback(&data, voter, &[]).is_ok());

        for rating in [0, 6] {
            data.rating = rating;
            let err = validate_feedback(&data, voter, &[]).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
    }

    #[test]
    fn test_badge_votes_must_name_another_participant() {
        let voter = Uuid::new_v4();
        let teammate = Uuid::new_v4();
        let outsider = Uuid::new_v4();
        let participants = vec![voter, teammate];

        let mut data = FeedbackSubmission {
            star_user_id: Some(teammate),
            manner_user_id: Some(teammate),
            rating: 4,
            comment: None,
        };
        assert!(validate_feedback(&data, voter, &participants).is_ok());

        data.star_user_id = Some(voter);
        let err = validate_feedback(&data, voter, &participants).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        data.star_user_id = Some(teammate);
        data.manner_user_id = Some(outsider);
        let err = validate_feedback(&data, voter, &participants).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}

//! Meetup lifecycle: create, join, leave, and the feedback flow.

use std::collections::HashMap;

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use capture_core::error::AppError;
use capture_database::repositories::meetup::MeetupRepository;
use capture_database::repositories::user::UserRepository;
use capture_entity::meetup::feedback::{FeedbackSubmission, MeetupFeedback};
use capture_entity::meetup::model::{CreateMeetup, Meetup};
use capture_entity::meetup::summary::SessionSummary;
use capture_entity::user::User;

use crate::context::RequestContext;

use super::list::{build_summary, rank_sessions, SessionFilter};
use super::rules;

/// Handles meetup sessions end to end.
#[derive(Clone)]
pub struct MeetupService {
    meetup_repo: Arc<MeetupRepository>,
    user_repo: Arc<UserRepository>,
}

impl MeetupService {
    /// Creates a new meetup service.
    pub fn new(meetup_repo: Arc<MeetupRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            meetup_repo,
            user_repo,
        }
    }

    /// Creates a meetup with the current user as host and first
    /// participant.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateMeetup,
    ) -> Result<Meetup, AppError> {
        if data.title.trim().is_empty() {
            return Err(AppError::validation("Title cannot be empty"));
        }
        if data.sport.trim().is_empty() {
            return Err(AppError::validation("Sport cannot be empty"));
        }
        if data.capacity < 2 {
            return Err(AppError::validation("Capacity must be at least 2"));
        }
        if data.ends_at <= data.starts_at {
            return Err(AppError::validation("End time must be after start time"));
        }
        if !(-90.0..=90.0).contains(&data.lat) || !(-180.0..=180.0).contains(&data.lng) {
            return Err(AppError::validation("Venue coordinates out of range"));
        }
        if data.starts_at < ctx.request_time {
            return Err(AppError::validation("Start time must be in the future"));
        }

        let meetup = self.meetup_repo.create(ctx.user_id, &data).await?;
        info!(meetup_id = %meetup.id, host_id = %ctx.user_id, "Meetup created");
        Ok(meetup)
    }

    /// The viewer's session list: filtered, tiered, distance-annotated.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &SessionFilter,
    ) -> Result<Vec<SessionSummary>, AppError> {
        let viewer_home = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .and_then(|u| u.home_coordinates());

        let rows = self.meetup_repo.list_with_host().await?;
        let ids: Vec<Uuid> = rows.iter().map(|r| r.meetup.id).collect();

        let mut participants_by_meetup: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for participant in self.meetup_repo.participants_for(&ids).await? {
            participants_by_meetup
                .entry(participant.meetup_id)
                .or_default()
                .push(participant.user_id);
        }

        let mut sessions: Vec<SessionSummary> = rows
            .into_iter()
            .map(|row| {
                let participants = participants_by_meetup
                    .remove(&row.meetup.id)
                    .unwrap_or_default();
                build_summary(row, participants, ctx.user_id, viewer_home)
            })
            .filter(|s| filter.matches(s))
            .collect();

        rank_sessions(&mut sessions, ctx.request_time);
        Ok(sessions)
    }

    /// One session's detail view.
    pub async fn detail(
        &self,
        ctx: &RequestContext,
        meetup_id: Uuid,
    ) -> Result<SessionSummary, AppError> {
        let row = self
            .meetup_repo
            .find_with_host(meetup_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Meetup {meetup_id} not found")))?;

        let viewer_home = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .and_then(|u| u.home_coordinates());
        let participants = self
            .meetup_repo
            .participants_of(meetup_id)
            .await?
            .into_iter()
            .map(|p| p.user_id)
            .collect();

        Ok(build_summary(row, participants, ctx.user_id, viewer_home))
    }

    /// The participant roster as user rows, join order preserved.
    pub async fn participants(&self, meetup_id: Uuid) -> Result<Vec<User>, AppError> {
        let participant_rows = self.meetup_repo.participants_of(meetup_id).await?;
        let order: Vec<Uuid> = participant_rows.iter().map(|p| p.user_id).collect();

        let mut users: HashMap<Uuid, User> = self
            .user_repo
            .find_by_ids(&order)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(order.iter().filter_map(|id| users.remove(id)).collect())
    }

    /// Joins a recruiting session with an open slot.
    pub async fn join(&self, ctx: &RequestContext, meetup_id: Uuid) -> Result<(), AppError> {
        let meetup = self.require_meetup(meetup_id).await?;
        let already_joined = self
            .meetup_repo
            .is_participant(meetup_id, ctx.user_id)
            .await?;
        rules::ensure_can_join(&meetup, already_joined, ctx.request_time)?;

        // The insert re-checks capacity against the live count.
        if !self
            .meetup_repo
            .insert_participant(meetup_id, ctx.user_id)
            .await?
        {
            return Err(AppError::conflict("This session is full"));
        }

        info!(meetup_id = %meetup_id, user_id = %ctx.user_id, "Joined meetup");
        Ok(())
    }

    /// Leaves a session. Host departures are rejected before any write
    /// happens; see [`rules::ensure_can_leave`].
    pub async fn leave(&self, ctx: &RequestContext, meetup_id: Uuid) -> Result<(), AppError> {
        let meetup = self.require_meetup(meetup_id).await?;
        rules::ensure_can_leave(&meetup, ctx.user_id)?;

        let removed = self
            .meetup_repo
            .delete_participant(meetup_id, ctx.user_id)
            .await?;
        if !removed {
            return Err(AppError::not_found("Not a participant of this session"));
        }

        info!(meetup_id = %meetup_id, user_id = %ctx.user_id, "Left meetup");
        Ok(())
    }

    /// Deletes a session. Host only, compared by user ID.
    pub async fn delete(&self, ctx: &RequestContext, meetup_id: Uuid) -> Result<(), AppError> {
        let meetup = self.require_meetup(meetup_id).await?;
        if meetup.host_id != ctx.user_id {
            return Err(AppError::forbidden("Only the host can delete a session"));
        }

        self.meetup_repo.delete(meetup_id).await?;
        info!(meetup_id = %meetup_id, host_id = %ctx.user_id, "Meetup deleted");
        Ok(())
    }

    /// Submits post-session feedback: a rating plus optional star-player
    /// and manner votes. The feedback row and both badge increments are
    /// written in a single transaction.
    ///
    /// The host's submission also moves the session to `finished`.
    pub async fn submit_feedback(
        &self,
        ctx: &RequestContext,
        meetup_id: Uuid,
        data: FeedbackSubmission,
    ) -> Result<MeetupFeedback, AppError> {
        let meetup = self.prepare_feedback(ctx, meetup_id).await?;

        let participant_ids: Vec<Uuid> = self
            .meetup_repo
            .participants_of(meetup_id)
            .await?
            .into_iter()
            .map(|p| p.user_id)
            .collect();
        rules::validate_feedback(&data, ctx.user_id, &participant_ids)?;

        let finish = meetup.host_id == ctx.user_id;
        let feedback = self
            .meetup_repo
            .submit_feedback(meetup_id, ctx.user_id, &data, finish)
            .await?;

        info!(meetup_id = %meetup_id, user_id = %ctx.user_id, finish, "Feedback submitted");
        Ok(feedback)
    }

    /// Records a skipped feedback prompt. The zero-rating row exists
    /// only to stop the notification feed from re-prompting.
    pub async fn skip_feedback(
        &self,
        ctx: &RequestContext,
        meetup_id: Uuid,
    ) -> Result<(), AppError> {
        self.prepare_feedback(ctx, meetup_id).await?;

        let skip = FeedbackSubmission {
            star_user_id: None,
            manner_user_id: None,
            rating: 0,
            comment: None,
        };
        self.meetup_repo
            .submit_feedback(meetup_id, ctx.user_id, &skip, false)
            .await?;

        info!(meetup_id = %meetup_id, user_id = %ctx.user_id, "Feedback skipped");
        Ok(())
    }

    /// Shared preconditions for feedback and skip: the viewer joined the
    /// session, the session is over, and no feedback row exists yet.
    async fn prepare_feedback(
        &self,
        ctx: &RequestContext,
        meetup_id: Uuid,
    ) -> Result<Meetup, AppError> {
        let meetup = self.require_meetup(meetup_id).await?;
        let is_participant = self
            .meetup_repo
            .is_participant(meetup_id, ctx.user_id)
            .await?;
        let already_responded = self
            .meetup_repo
            .feedback_exists(meetup_id, ctx.user_id)
            .await?;
        rules::ensure_feedback_open(&meetup, is_participant, already_responded, ctx.request_time)?;

        Ok(meetup)
    }

    async fn require_meetup(&self, meetup_id: Uuid) -> Result<Meetup, AppError> {
        self.meetup_repo
            .find_by_id(meetup_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Meetup {meetup_id} not found")))
    }
}

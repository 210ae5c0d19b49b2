//! Meetup handlers — session list, lifecycle, participants, feedback.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use capture_entity::meetup::{FeedbackSubmission, Meetup, MeetupFeedback, SessionSummary};
use capture_entity::user::User;
use capture_service::SessionFilter;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/meetups
///
/// Query parameters map straight onto [`SessionFilter`]: `query`,
/// `sport`, `level`, `host`, `distance` (bucket name), `open_only`.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Query(filter): Query<SessionFilter>,
) -> Result<Json<ApiResponse<Vec<SessionSummary>>>, ApiError> {
    let sessions = state.meetup_service.list(&ctx, &filter).await?;

    Ok(Json(ApiResponse::ok(sessions)))
}

/// POST /api/meetups
pub async fn create(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(data): Json<capture_entity::meetup::CreateMeetup>,
) -> Result<Json<ApiResponse<Meetup>>, ApiError> {
    let meetup = state.meetup_service.create(&ctx, data).await?;

    Ok(Json(ApiResponse::ok(meetup)))
}

/// GET /api/meetups/{id}
pub async fn detail(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(meetup_id): Path<Uuid>,
) -> Result<Json<ApiResponse<SessionSummary>>, ApiError> {
    let session = state.meetup_service.detail(&ctx, meetup_id).await?;

    Ok(Json(ApiResponse::ok(session)))
}

/// DELETE /api/meetups/{id} — host only.
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(meetup_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.meetup_service.delete(&ctx, meetup_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Meetup deleted"))))
}

/// POST /api/meetups/{id}/join
pub async fn join(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(meetup_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.meetup_service.join(&ctx, meetup_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Joined"))))
}

/// POST /api/meetups/{id}/leave
pub async fn leave(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(meetup_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.meetup_service.leave(&ctx, meetup_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Left"))))
}

/// GET /api/meetups/{id}/participants
pub async fn participants(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(meetup_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let roster = state.meetup_service.participants(meetup_id).await?;

    Ok(Json(ApiResponse::ok(roster)))
}

/// POST /api/meetups/{id}/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(meetup_id): Path<Uuid>,
    Json(data): Json<FeedbackSubmission>,
) -> Result<Json<ApiResponse<MeetupFeedback>>, ApiError> {
    let feedback = state
        .meetup_service
        .submit_feedback(&ctx, meetup_id, data)
        .await?;

    Ok(Json(ApiResponse::ok(feedback)))
}

/// POST /api/meetups/{id}/feedback/skip
pub async fn skip_feedback(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(meetup_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.meetup_service.skip_feedback(&ctx, meetup_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Feedback skipped"))))
}

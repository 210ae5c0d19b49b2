//! Chat handlers — meetup threads, DM threads, conversation list.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use capture_entity::message::{ConversationSummary, Message};

use crate::dto::request::SendMessageRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/meetups/{id}/messages
pub async fn meetup_thread(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(meetup_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Message>>>, ApiError> {
    let messages = state.chat_service.meetup_thread(&ctx, meetup_id).await?;

    Ok(Json(ApiResponse::ok(messages)))
}

/// POST /api/meetups/{id}/messages
pub async fn send_meetup_message(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(meetup_id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<Message>>, ApiError> {
    let message = state
        .chat_service
        .send_meetup_message(&ctx, meetup_id, &req.body)
        .await?;

    Ok(Json(ApiResponse::ok(message)))
}

/// GET /api/conversations
pub async fn conversations(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Result<Json<ApiResponse<Vec<ConversationSummary>>>, ApiError> {
    let summaries = state.chat_service.conversations(&ctx).await?;

    Ok(Json(ApiResponse::ok(summaries)))
}

/// GET /api/conversations/{partner_id}/messages
pub async fn direct_thread(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(partner_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Message>>>, ApiError> {
    let messages = state.chat_service.direct_thread(&ctx, partner_id).await?;

    Ok(Json(ApiResponse::ok(messages)))
}

/// POST /api/conversations/{partner_id}/messages
pub async fn send_direct_message(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(partner_id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<Message>>, ApiError> {
    let message = state
        .chat_service
        .send_direct_message(&ctx, partner_id, &req.body)
        .await?;

    Ok(Json(ApiResponse::ok(message)))
}

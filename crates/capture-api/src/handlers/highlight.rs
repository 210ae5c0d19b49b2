//! Highlight handlers — feed, upload, likes, comments.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use uuid::Uuid;

use capture_core::error::AppError;
use capture_core::types::pagination::PageResponse;
use capture_entity::highlight::{Highlight, HighlightCard, HighlightComment};

use crate::dto::request::{CommentRequest, UpdateCaptionRequest};
use crate::dto::response::{ApiResponse, LikeResponse, MessageResponse, ShareLinkResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/highlights
pub async fn feed(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<HighlightCard>>>, ApiError> {
    let page = state
        .highlight_service
        .feed(&ctx, &pagination.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/highlights — multipart with `caption`, `sport`, and `file`.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Highlight>>, ApiError> {
    let mut caption = String::new();
    let mut sport = String::new();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("caption") => {
                caption = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid caption part: {e}")))?;
            }
            Some("sport") => {
                sport = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid sport part: {e}")))?;
            }
            Some("file") => {
                let content_type = field
                    .content_type()
                    .ok_or_else(|| AppError::validation("Media part is missing a content type"))?
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Failed to read media upload: {e}"))
                })?;
                upload = Some((content_type, data));
            }
            _ => {}
        }
    }

    let (content_type, data) =
        upload.ok_or_else(|| AppError::validation("Multipart body has no 'file' part"))?;

    let highlight = state
        .highlight_service
        .create(&ctx, &caption, &sport, &content_type, data)
        .await?;

    Ok(Json(ApiResponse::ok(highlight)))
}

/// GET /api/highlights/{id}
pub async fn get(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(highlight_id): Path<Uuid>,
) -> Result<Json<ApiResponse<HighlightCard>>, ApiError> {
    let card = state.highlight_service.get_card(&ctx, highlight_id).await?;

    Ok(Json(ApiResponse::ok(card)))
}

/// PUT /api/highlights/{id}
pub async fn update_caption(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(highlight_id): Path<Uuid>,
    Json(req): Json<UpdateCaptionRequest>,
) -> Result<Json<ApiResponse<Highlight>>, ApiError> {
    let highlight = state
        .highlight_service
        .update_caption(&ctx, highlight_id, &req.caption)
        .await?;

    Ok(Json(ApiResponse::ok(highlight)))
}

/// DELETE /api/highlights/{id}
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(highlight_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.highlight_service.delete(&ctx, highlight_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Highlight deleted"))))
}

/// GET /api/highlights/{id}/share — permalink for sharing outside the app.
pub async fn share_link(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(highlight_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShareLinkResponse>>, ApiError> {
    // Only existing highlights get a link.
    state.highlight_service.get_card(&ctx, highlight_id).await?;

    let base = state.config.server.public_base_url.trim_end_matches('/');
    let url = format!("{base}/highlights/{highlight_id}");

    Ok(Json(ApiResponse::ok(ShareLinkResponse { url })))
}

/// POST /api/highlights/{id}/like — toggles the viewer's like.
pub async fn toggle_like(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(highlight_id): Path<Uuid>,
) -> Result<Json<ApiResponse<LikeResponse>>, ApiError> {
    let (liked, like_count) = state.highlight_service.toggle_like(&ctx, highlight_id).await?;

    Ok(Json(ApiResponse::ok(LikeResponse { liked, like_count })))
}

/// GET /api/highlights/{id}/comments
pub async fn comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(highlight_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<HighlightComment>>>, ApiError> {
    let comments = state.highlight_service.comments(highlight_id).await?;

    Ok(Json(ApiResponse::ok(comments)))
}

/// POST /api/highlights/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(highlight_id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<ApiResponse<HighlightComment>>, ApiError> {
    let comment = state
        .highlight_service
        .add_comment(&ctx, highlight_id, &req.body)
        .await?;

    Ok(Json(ApiResponse::ok(comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.highlight_service.delete_comment(&ctx, comment_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Comment deleted"))))
}

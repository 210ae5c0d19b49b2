//! User handlers — profiles, avatars, follows, account deletion.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::HeaderMap;
use uuid::Uuid;

use capture_core::error::AppError;
use capture_entity::highlight::HighlightCard;
use capture_entity::user::{UpdateProfile, User};
use capture_service::user::service::UserProfile;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Header carrying the elevated credential for account deletion.
const SERVICE_ROLE_HEADER: &str = "x-service-role-key";

/// GET /api/users/me
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.current_user(&ctx).await?;

    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/me
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(data): Json<UpdateProfile>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.update_profile(&ctx, data).await?;

    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/users/me/avatar — multipart upload with a single `file` part.
pub async fn upload_avatar(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::validation("Avatar part is missing a content type"))?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read avatar upload: {e}")))?;

        let user = state
            .user_service
            .upload_avatar(&ctx, &content_type, data)
            .await?;

        return Ok(Json(ApiResponse::ok(user)));
    }

    Err(AppError::validation("Multipart body has no 'file' part").into())
}

/// GET /api/users/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let profile = state.user_service.profile_of(&ctx, user_id).await?;

    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /api/users/{id}/highlights
pub async fn user_highlights(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<HighlightCard>>>, ApiError> {
    let cards = state.highlight_service.by_author(&ctx, user_id).await?;

    Ok(Json(ApiResponse::ok(cards)))
}

/// POST /api/users/{id}/follow
pub async fn follow(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.user_service.follow(&ctx, user_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Followed"))))
}

/// DELETE /api/users/{id}/follow
pub async fn unfollow(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.user_service.unfollow(&ctx, user_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Unfollowed"))))
}

/// GET /api/users/{id}/followers
pub async fn followers(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.user_service.followers(user_id).await?;

    Ok(Json(ApiResponse::ok(users)))
}

/// GET /api/users/{id}/following
pub async fn following(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.user_service.following(user_id).await?;

    Ok(Json(ApiResponse::ok(users)))
}

/// DELETE /api/users/me
///
/// Requires the elevated service credential in `x-service-role-key`;
/// the user's own access token alone is not sufficient.
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let presented = headers
        .get(SERVICE_ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::forbidden("Account deletion requires the service role credential")
        })?;

    state.user_service.delete_account(presented, ctx.user_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Account deleted"))))
}

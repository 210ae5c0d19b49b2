//! Auth handlers — register, login, OAuth callback, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use capture_core::error::AppError;
use capture_entity::user::User;

use crate::dto::request::{LoginRequest, OAuthCallbackRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let (user, tokens) = state
        .auth_service
        .register(&req.username, req.email, &req.password, &req.nickname)
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse::new(tokens, Some(user)))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let (user, tokens) = state.auth_service.login(&req.username, &req.password).await?;

    Ok(Json(ApiResponse::ok(AuthResponse::new(tokens, Some(user)))))
}

/// POST /api/auth/oauth/callback
pub async fn oauth_callback(
    State(state): State<AppState>,
    Json(req): Json<OAuthCallbackRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let (user, tokens) = state.auth_service.oauth_login(&req.code).await?;

    Ok(Json(ApiResponse::ok(AuthResponse::new(tokens, Some(user)))))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let tokens = state.auth_service.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(AuthResponse::new(tokens, None))))
}

/// POST /api/auth/logout
///
/// Blocklists the presented access token for its remaining lifetime.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Missing or malformed Authorization header"))?;

    let claims = state.jwt_decoder.decode_access_token(token).await?;
    state.auth_service.logout(&claims).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.current_user(&ctx).await?;

    Ok(Json(ApiResponse::ok(user)))
}

//! Notification handlers.

use axum::Json;
use axum::extract::State;

use capture_entity::notification::NotificationItem;

use crate::dto::response::{ApiResponse, CountResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications
///
/// Returns the aggregated feed and advances the viewer's read watermark
/// to now; items carry read flags as of the previous watermark.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Result<Json<ApiResponse<Vec<NotificationItem>>>, ApiError> {
    let items = state.notification_service.list(&ctx).await?;

    Ok(Json(ApiResponse::ok(items)))
}

/// GET /api/notifications/unread-count
///
/// Counts unread items without touching the watermark, so polling this
/// endpoint never marks anything read.
pub async fn unread_count(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count(&ctx).await?;

    Ok(Json(ApiResponse::ok(CountResponse {
        count: count as u64,
    })))
}

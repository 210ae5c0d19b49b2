//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let database = match sqlx::query("SELECT 1").execute(&state.db_pool).await {
        Ok(_) => "connected",
        Err(_) => "unreachable",
    };

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
        ws_connections: state.hub.connection_count(),
    }))
}

//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use capture_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Wrapper turning an [`AppError`] into an HTTP response.
///
/// Handlers return `Result<_, ApiError>` so `?` works on any
/// service-layer call.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = match &err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            _ => {
                tracing::error!(error = %err.message, kind = %err.kind, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: err.message.clone(),
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn maps_domain_kinds_to_status_codes() {
        assert_eq!(status_of(AppError::validation("bad")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::unauthorized("who")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AppError::forbidden("no")), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AppError::not_found("gone")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::conflict("dup")), StatusCode::CONFLICT);
        assert_eq!(
            status_of(AppError::database("down")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

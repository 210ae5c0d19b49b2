//! Bearer-token authentication extractor.

use std::ops::Deref;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use capture_core::error::AppError;
use capture_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracts and validates the `Authorization: Bearer` token, yielding
/// the authenticated request context.
///
/// Handlers take `AuthUser(ctx): AuthUser` as an argument; routes
/// without it are public.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl Deref for AuthUser {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::unauthorized("Missing or malformed Authorization header"))?;

        let claims = state.jwt_decoder.decode_access_token(token).await?;

        Ok(Self(RequestContext::new(
            claims.user_id(),
            claims.username.clone(),
            claims.nickname.clone(),
        )))
    }
}

/// Pulls the bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(AUTHORIZATION, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn extracts_a_bearer_token() {
        let parts = parts_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_other_schemes() {
        let parts = parts_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn rejects_an_empty_token() {
        let parts = parts_with_auth("Bearer ");
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn rejects_a_missing_header() {
        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        assert_eq!(bearer_token(&parts), None);
    }
}

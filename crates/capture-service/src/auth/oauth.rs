//! OAuth code exchange against the configured external provider.

use serde::Deserialize;

use capture_core::config::auth::OAuthConfig;
use capture_core::error::AppError;

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Identity returned by the provider's userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthUserInfo {
    /// Stable subject identifier at the provider.
    pub sub: String,
    /// Email, when the provider shares it.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Avatar URL.
    pub picture: Option<String>,
}

/// Client for the authorization-code exchange flow.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl OAuthClient {
    /// Creates a client from OAuth configuration.
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Whether OAuth login is enabled in configuration.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Exchanges an authorization code for the provider identity.
    pub async fn exchange_code(&self, code: &str) -> Result<OAuthUserInfo, AppError> {
        if !self.config.enabled {
            return Err(AppError::validation("OAuth login is not enabled"));
        }

        let token: TokenResponse = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", &self.config.client_id),
                ("client_secret", &self.config.client_secret),
                ("redirect_uri", &self.config.redirect_uri),
            ])
            .send()
            .await
            .map_err(|e| AppError::external(format!("OAuth token request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::unauthorized(format!("OAuth code rejected: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::external(format!("Invalid OAuth token response: {e}")))?;

        self.http
            .get(&self.config.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| AppError::external(format!("OAuth userinfo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::external(format!("OAuth userinfo rejected: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::external(format!("Invalid OAuth userinfo response: {e}")))
    }
}

//! Authentication and credential configuration.

use serde::{Deserialize, Serialize};

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Administrative service credential used by the account-deletion
    /// endpoint. Must carry a `role` claim equal to `service_role_name`.
    #[serde(default)]
    pub service_role_key: String,
    /// Expected elevated role claim value for the service credential.
    #[serde(default = "default_service_role")]
    pub service_role_name: String,
    /// Public/anonymous role claim value; a service credential carrying
    /// this role is a misconfiguration and is rejected.
    #[serde(default = "default_anon_role")]
    pub anon_role_name: String,
    /// OAuth provider settings for the redirect callback flow.
    #[serde(default)]
    pub oauth: OAuthConfig,
}

/// OAuth authorization-code exchange configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OAuthConfig {
    /// Whether the OAuth callback is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Token endpoint of the provider.
    #[serde(default)]
    pub token_url: String,
    /// User-info endpoint of the provider.
    #[serde(default)]
    pub userinfo_url: String,
    /// Client ID registered with the provider.
    #[serde(default)]
    pub client_id: String,
    /// Client secret registered with the provider.
    #[serde(default)]
    pub client_secret: String,
    /// Redirect URI registered with the provider.
    #[serde(default)]
    pub redirect_uri: String,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    24 * 7
}

fn default_password_min() -> usize {
    8
}

fn default_service_role() -> String {
    "service_role".to_string()
}

fn default_anon_role() -> String {
    "anon".to_string()
}

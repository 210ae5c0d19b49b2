//! Authentication use cases: register, login, token refresh, OAuth.

pub mod oauth;
pub mod service;

pub use oauth::OAuthClient;
pub use service::AuthService;

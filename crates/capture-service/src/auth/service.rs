//! Registration, login, and token lifecycle.

use std::sync::Arc;

use tracing::info;

use capture_auth::jwt::claims::Claims;
use capture_auth::jwt::decoder::JwtDecoder;
use capture_auth::jwt::encoder::{JwtEncoder, TokenPair};
use capture_auth::password::{PasswordHasher, PasswordValidator};
use capture_core::error::AppError;
use capture_database::repositories::user::UserRepository;
use capture_entity::user::model::CreateUser;
use capture_entity::user::User;

use super::oauth::{OAuthClient, OAuthUserInfo};

/// Handles authentication use cases.
#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    oauth: Arc<OAuthClient>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        oauth: Arc<OAuthClient>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
            decoder,
            oauth,
        }
    }

    /// Registers a new account and signs it in.
    pub async fn register(
        &self,
        username: &str,
        email: Option<String>,
        password: &str,
        nickname: &str,
    ) -> Result<(User, TokenPair), AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(AppError::validation("Nickname cannot be empty"));
        }

        self.validator.validate(password)?;

        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{username}' already exists"
            )));
        }
        if let Some(ref email) = email {
            if self.user_repo.find_by_email(email).await?.is_some() {
                return Err(AppError::conflict("Email already in use"));
            }
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                email,
                password_hash,
                nickname: nickname.to_string(),
            })
            .await?;

        let tokens = self
            .encoder
            .generate_token_pair(user.id, &user.username, &user.nickname)?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok((user, tokens))
    }

    /// Verifies credentials and issues a token pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, TokenPair), AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        // OAuth-only accounts carry an empty hash and cannot password-login.
        if user.password_hash.is_empty()
            || !self.hasher.verify_password(password, &user.password_hash)?
        {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let tokens = self
            .encoder
            .generate_token_pair(user.id, &user.username, &user.nickname)?;

        info!(user_id = %user.id, "User logged in");
        Ok((user, tokens))
    }

    /// Signs in (creating the account on first use) via an OAuth code.
    pub async fn oauth_login(&self, code: &str) -> Result<(User, TokenPair), AppError> {
        let identity = self.oauth.exchange_code(code).await?;
        let user = self.find_or_create_oauth_user(identity).await?;

        let tokens = self
            .encoder
            .generate_token_pair(user.id, &user.username, &user.nickname)?;

        info!(user_id = %user.id, "User logged in via OAuth");
        Ok((user, tokens))
    }

    /// Rotates a refresh token into a fresh pair, revoking the old one.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token).await?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

        // One-shot refresh tokens: the old jti is dead from here on.
        self.decoder
            .blocklist_token(claims.jti, claims.remaining_ttl_seconds())
            .await?;

        self.encoder
            .generate_token_pair(user.id, &user.username, &user.nickname)
    }

    /// Revokes the current access token.
    pub async fn logout(&self, claims: &Claims) -> Result<(), AppError> {
        self.decoder
            .blocklist_token(claims.jti, claims.remaining_ttl_seconds())
            .await?;
        info!(user_id = %claims.sub, "User logged out");
        Ok(())
    }

    async fn find_or_create_oauth_user(&self, identity: OAuthUserInfo) -> Result<User, AppError> {
        // The provider subject doubles as the username, keeping repeat
        // sign-ins idempotent.
        let username = format!("oauth_{}", identity.sub);
        if let Some(user) = self.user_repo.find_by_username(&username).await? {
            return Ok(user);
        }

        let nickname = identity
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| username.clone());

        let user = self
            .user_repo
            .create(&CreateUser {
                username,
                email: identity.email,
                password_hash: String::new(),
                nickname,
            })
            .await?;

        if let Some(picture) = identity.picture {
            self.user_repo.update_avatar(user.id, &picture).await?;
        }

        info!(user_id = %user.id, "OAuth account created");
        Ok(user)
    }
}

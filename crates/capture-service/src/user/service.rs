//! User self-service operations and the service-role account deletion.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use capture_auth::service_role::ServiceRoleVerifier;
use capture_cache::{keys, CacheManager};
use capture_core::error::AppError;
use capture_core::traits::cache::CacheProvider;
use capture_database::repositories::follow::FollowRepository;
use capture_database::repositories::user::UserRepository;
use capture_entity::user::model::UpdateProfile;
use capture_entity::user::User;
use capture_storage::media::MediaStore;

use crate::context::RequestContext;

/// Cached profile TTL.
const PROFILE_CACHE_TTL: Duration = Duration::from_secs(300);

/// A public profile with follow counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// The profile owner.
    #[serde(flatten)]
    pub user: User,
    /// Number of users following this profile.
    pub follower_count: i64,
    /// Number of users this profile follows.
    pub following_count: i64,
    /// Whether the requesting viewer follows this profile.
    pub followed_by_viewer: bool,
}

/// Handles profile viewing, editing, the follow graph, and deletion.
#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    follow_repo: Arc<FollowRepository>,
    cache: Arc<CacheManager>,
    media: Arc<MediaStore>,
    service_role: Arc<ServiceRoleVerifier>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        follow_repo: Arc<FollowRepository>,
        cache: Arc<CacheManager>,
        media: Arc<MediaStore>,
        service_role: Arc<ServiceRoleVerifier>,
    ) -> Self {
        Self {
            user_repo,
            follow_repo,
            cache,
            media,
            service_role,
        }
    }

    /// The current user's own row, read through the cache.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        let key = keys::profile_by_id(ctx.user_id);
        if let Ok(Some(cached)) = self.cache.get_json::<User>(&key).await {
            return Ok(cached);
        }

        let user = self.require_user(ctx.user_id).await?;
        if let Err(e) = self.cache.set_json(&key, &user, PROFILE_CACHE_TTL).await {
            warn!(error = %e, "Failed to cache profile");
        }
        Ok(user)
    }

    /// A public profile page as seen by the viewer.
    pub async fn profile_of(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<UserProfile, AppError> {
        let user = self.require_user(user_id).await?;
        let (follower_count, following_count) = self.follow_repo.counts_for(user_id).await?;
        let followed_by_viewer = ctx.user_id != user_id
            && self.follow_repo.is_following(ctx.user_id, user_id).await?;

        Ok(UserProfile {
            user,
            follower_count,
            following_count,
            followed_by_viewer,
        })
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        data: UpdateProfile,
    ) -> Result<User, AppError> {
        if let Some(ref nickname) = data.nickname {
            if nickname.trim().is_empty() {
                return Err(AppError::validation("Nickname cannot be empty"));
            }
        }
        if let Some(lat) = data.home_lat {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(AppError::validation("Latitude out of range"));
            }
        }
        if let Some(lng) = data.home_lng {
            if !(-180.0..=180.0).contains(&lng) {
                return Err(AppError::validation("Longitude out of range"));
            }
        }

        let user = self.user_repo.update_profile(ctx.user_id, &data).await?;
        self.invalidate_profile(ctx.user_id).await;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }

    /// Stores a new avatar image and points the profile at it.
    pub async fn upload_avatar(
        &self,
        ctx: &RequestContext,
        content_type: &str,
        data: Bytes,
    ) -> Result<User, AppError> {
        let user = self.require_user(ctx.user_id).await?;
        let url = self.media.store("avatars", content_type, data).await?;

        self.user_repo.update_avatar(ctx.user_id, &url).await?;
        if let Some(old) = user.avatar_url {
            if let Err(e) = self.media.delete(&old).await {
                warn!(error = %e, "Failed to remove previous avatar");
            }
        }
        self.invalidate_profile(ctx.user_id).await;

        self.require_user(ctx.user_id).await
    }

    /// Follows another user. Idempotent.
    pub async fn follow(&self, ctx: &RequestContext, target_id: Uuid) -> Result<(), AppError> {
        if target_id == ctx.user_id {
            return Err(AppError::validation("Cannot follow yourself"));
        }
        self.require_user(target_id).await?;
        self.follow_repo.follow(ctx.user_id, target_id).await?;
        Ok(())
    }

    /// Unfollows another user. Idempotent.
    pub async fn unfollow(&self, ctx: &RequestContext, target_id: Uuid) -> Result<(), AppError> {
        self.follow_repo.unfollow(ctx.user_id, target_id).await?;
        Ok(())
    }

    /// Users following the given profile.
    pub async fn followers(&self, user_id: Uuid) -> Result<Vec<User>, AppError> {
        self.follow_repo.followers_of(user_id).await
    }

    /// Users the given profile follows.
    pub async fn following(&self, user_id: Uuid) -> Result<Vec<User>, AppError> {
        self.follow_repo.followees_of(user_id).await
    }

    /// Deletes an account and everything it owns.
    ///
    /// Callable only with the administrative service credential, never a
    /// user token: the presented key must equal the configured
    /// service-role key, which is itself validated to carry the
    /// service-role claim rather than the anon key.
    pub async fn delete_account(
        &self,
        presented_key: &str,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let expected = self.service_role.verified_key()?;
        if presented_key != expected {
            return Err(AppError::forbidden(
                "Account deletion requires the service role credential",
            ));
        }

        let user = self.require_user(user_id).await?;
        if let Some(avatar) = &user.avatar_url {
            if let Err(e) = self.media.delete(avatar).await {
                warn!(error = %e, "Failed to remove avatar during account deletion");
            }
        }

        let deleted = self.user_repo.delete(user_id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        self.invalidate_profile(user_id).await;
        if let Err(e) = self.cache.delete(&keys::user_by_username(&user.username)).await {
            warn!(error = %e, "Failed to drop username cache entry");
        }

        info!(user_id = %user_id, "Account deleted via service role");
        Ok(())
    }

    async fn require_user(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    async fn invalidate_profile(&self, user_id: Uuid) {
        if let Err(e) = self.cache.delete(&keys::profile_by_id(user_id)).await {
            warn!(error = %e, "Failed to invalidate profile cache");
        }
    }
}

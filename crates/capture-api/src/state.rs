//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use capture_auth::jwt::decoder::JwtDecoder;
use capture_auth::jwt::encoder::JwtEncoder;
use capture_cache::provider::CacheManager;
use capture_core::config::AppConfig;
use capture_realtime::RealtimeHub;
use capture_storage::MediaStore;

use capture_service::auth::service::AuthService;
use capture_service::chat::service::ChatService;
use capture_service::highlight::service::HighlightService;
use capture_service::meetup::service::MeetupService;
use capture_service::notification::service::NotificationService;
use capture_service::user::service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// In-process cache manager
    pub cache: Arc<CacheManager>,
    /// Local filesystem media store
    pub media: Arc<MediaStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Realtime ─────────────────────────────────────────────
    /// WebSocket pub/sub hub
    pub hub: Arc<RealtimeHub>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login, OAuth, token refresh
    pub auth_service: Arc<AuthService>,
    /// Profiles, follows, avatars, account deletion
    pub user_service: Arc<UserService>,
    /// Highlight feed and interactions
    pub highlight_service: Arc<HighlightService>,
    /// Meetup lifecycle, session list, feedback
    pub meetup_service: Arc<MeetupService>,
    /// Meetup chat and direct messages
    pub chat_service: Arc<ChatService>,
    /// Notification aggregation and watermark
    pub notification_service: Arc<NotificationService>,
}

//! Application builder — wires repositories, services, and the realtime
//! hub into an Axum app, then runs it with graceful shutdown.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use capture_core::config::AppConfig;
use capture_core::error::AppError;
use capture_database::repositories::{
    FollowRepository, HighlightRepository, MeetupRepository, MessageRepository, UserRepository,
    WatermarkRepository,
};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete application state from configuration and a
/// database pool.
pub async fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    // ── Infrastructure ───────────────────────────────────────────
    let cache = Arc::new(capture_cache::provider::CacheManager::new(&config.cache)?);
    let media = Arc::new(capture_storage::MediaStore::new(&config.storage).await?);
    let hub = Arc::new(capture_realtime::RealtimeHub::new(config.realtime.clone()));

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let follow_repo = Arc::new(FollowRepository::new(db_pool.clone()));
    let highlight_repo = Arc::new(HighlightRepository::new(db_pool.clone()));
    let meetup_repo = Arc::new(MeetupRepository::new(db_pool.clone()));
    let message_repo = Arc::new(MessageRepository::new(db_pool.clone()));
    let watermark_repo = Arc::new(WatermarkRepository::new(db_pool.clone()));

    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(capture_auth::password::PasswordHasher::new());
    let password_validator = Arc::new(capture_auth::password::PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(capture_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(capture_auth::jwt::JwtDecoder::new(
        &config.auth,
        Arc::clone(&cache),
    ));
    let service_role = Arc::new(capture_auth::ServiceRoleVerifier::new(&config.auth));
    let oauth = Arc::new(capture_service::OAuthClient::new(config.auth.oauth.clone()));

    // ── Services ─────────────────────────────────────────────────
    let auth_service = Arc::new(capture_service::AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_validator),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        Arc::clone(&oauth),
    ));
    let user_service = Arc::new(capture_service::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&follow_repo),
        Arc::clone(&cache),
        Arc::clone(&media),
        Arc::clone(&service_role),
    ));
    let highlight_service = Arc::new(capture_service::HighlightService::new(
        Arc::clone(&highlight_repo),
        Arc::clone(&media),
    ));
    let meetup_service = Arc::new(capture_service::MeetupService::new(
        Arc::clone(&meetup_repo),
        Arc::clone(&user_repo),
    ));
    let chat_service = Arc::new(capture_service::ChatService::new(
        Arc::clone(&message_repo),
        Arc::clone(&meetup_repo),
        Arc::clone(&user_repo),
        Arc::clone(&hub),
    ));
    let notification_service = Arc::new(capture_service::NotificationService::new(
        Arc::clone(&highlight_repo),
        Arc::clone(&meetup_repo),
        Arc::clone(&watermark_repo),
    ));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        cache,
        media,
        jwt_encoder,
        jwt_decoder,
        hub,
        auth_service,
        user_service,
        highlight_service,
        meetup_service,
        chat_service,
        notification_service,
    })
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Capture Now server with the given configuration and
/// database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let grace = config.server.shutdown_grace_seconds;

    let state = build_state(config, db_pool).await?;
    let app = build_app(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Capture Now server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!(
                grace_seconds = grace,
                "Shutdown signal received, draining connections"
            );
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Capture Now server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

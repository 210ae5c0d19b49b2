//! Route definitions for the Capture Now HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`; the
//! WebSocket endpoint and static media serving live at the root.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(highlight_routes())
        .merge(meetup_routes())
        .merge(chat_routes())
        .merge(notification_routes())
        .merge(health_routes());

    let media_prefix = state.config.storage.public_path.clone();
    let media_dir = ServeDir::new(state.media.root());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::ws_handler))
        .nest_service(&media_prefix, media_dir)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Auth endpoints: register, login, OAuth, refresh, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/oauth/callback", post(handlers::auth::oauth_callback))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Profiles, avatars, follow graph, account deletion
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::get_me))
        .route("/users/me", put(handlers::user::update_me))
        .route("/users/me", delete(handlers::user::delete_account))
        .route("/users/me/avatar", post(handlers::user::upload_avatar))
        .route("/users/{id}", get(handlers::user::get_profile))
        .route("/users/{id}/highlights", get(handlers::user::user_highlights))
        .route("/users/{id}/follow", post(handlers::user::follow))
        .route("/users/{id}/follow", delete(handlers::user::unfollow))
        .route("/users/{id}/followers", get(handlers::user::followers))
        .route("/users/{id}/following", get(handlers::user::following))
}

/// Highlight feed, uploads, likes, comments
fn highlight_routes() -> Router<AppState> {
    Router::new()
        .route("/highlights", get(handlers::highlight::feed))
        .route("/highlights", post(handlers::highlight::create))
        .route("/highlights/{id}", get(handlers::highlight::get))
        .route("/highlights/{id}", put(handlers::highlight::update_caption))
        .route("/highlights/{id}", delete(handlers::highlight::delete))
        .route("/highlights/{id}/like", post(handlers::highlight::toggle_like))
        .route("/highlights/{id}/share", get(handlers::highlight::share_link))
        .route("/highlights/{id}/comments", get(handlers::highlight::comments))
        .route(
            "/highlights/{id}/comments",
            post(handlers::highlight::add_comment),
        )
        .route("/comments/{id}", delete(handlers::highlight::delete_comment))
}

/// Session list, lifecycle, participants, feedback, meetup chat
fn meetup_routes() -> Router<AppState> {
    Router::new()
        .route("/meetups", get(handlers::meetup::list))
        .route("/meetups", post(handlers::meetup::create))
        .route("/meetups/{id}", get(handlers::meetup::detail))
        .route("/meetups/{id}", delete(handlers::meetup::delete))
        .route("/meetups/{id}/join", post(handlers::meetup::join))
        .route("/meetups/{id}/leave", post(handlers::meetup::leave))
        .route("/meetups/{id}/participants", get(handlers::meetup::participants))
        .route("/meetups/{id}/feedback", post(handlers::meetup::submit_feedback))
        .route(
            "/meetups/{id}/feedback/skip",
            post(handlers::meetup::skip_feedback),
        )
        .route("/meetups/{id}/messages", get(handlers::chat::meetup_thread))
        .route(
            "/meetups/{id}/messages",
            post(handlers::chat::send_meetup_message),
        )
}

/// Direct-message conversations
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(handlers::chat::conversations))
        .route(
            "/conversations/{partner_id}/messages",
            get(handlers::chat::direct_thread),
        )
        .route(
            "/conversations/{partner_id}/messages",
            post(handlers::chat::send_direct_message),
        )
}

/// The aggregated notification feed
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list))
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
}

/// Health probes
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

//! WebSocket upgrade handler and socket loop.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

use capture_realtime::connection::ConnectionHandle;
use capture_realtime::message::{InboundMessage, MessageEnvelope, OutboundMessage};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// GET /ws?token={jwt} — WebSocket upgrade
pub async fn ws_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    // Authenticate before upgrade
    let claims = state.jwt_decoder.decode_access_token(&query.token).await?;
    let user_id = claims.user_id();
    let nickname = claims.nickname.clone();

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, user_id, nickname, socket)))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(
    state: AppState,
    user_id: uuid::Uuid,
    nickname: String,
    socket: WebSocket,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.hub.register(user_id, nickname);
    let conn_id = handle.id;

    info!(conn_id = %conn_id, user_id = %user_id, "WebSocket connection established");

    // Forward hub envelopes to the socket
    let outbound_task = tokio::spawn(async move {
        while let Some(envelope) = outbound_rx.recv().await {
            let json = match serde_json::to_string(&envelope) {
                Ok(json) => json,
                Err(e) => {
                    warn!(error = %e, "Failed to serialize outbound envelope");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_inbound(&state, &handle, &text).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.hub.unregister(conn_id);

    info!(conn_id = %conn_id, user_id = %user_id, "WebSocket connection closed");
}

/// Dispatches one parsed client frame.
async fn handle_inbound(state: &AppState, handle: &Arc<ConnectionHandle>, text: &str) {
    let inbound: InboundMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(_) => {
            send_error(handle, "Unrecognized message");
            return;
        }
    };

    match inbound {
        InboundMessage::Subscribe { channel } => {
            match state.chat_service.can_subscribe(handle.user_id, &channel).await {
                Ok(true) => {
                    state.hub.subscribe(channel.clone(), handle.id);
                    handle.send(MessageEnvelope::direct(OutboundMessage::Subscribed {
                        channel,
                    }));
                }
                Ok(false) => send_error(handle, "Not authorized for this channel"),
                Err(e) => {
                    warn!(conn_id = %handle.id, error = %e, "Subscription check failed");
                    send_error(handle, "Subscription failed");
                }
            }
        }
        InboundMessage::Unsubscribe { channel } => {
            state.hub.unsubscribe(&channel, handle.id);
            handle.send(MessageEnvelope::direct(OutboundMessage::Unsubscribed {
                channel,
            }));
        }
        InboundMessage::Pong { .. } => {}
    }
}

fn send_error(handle: &Arc<ConnectionHandle>, message: &str) {
    handle.send(MessageEnvelope::direct(OutboundMessage::Error {
        message: message.to_string(),
    }));
}

//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::{IntoResponse, Response};

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::ConnectionId;
use crate::error::ChatError;

/// `GET /` and `GET /ws`: upgrade the HTTP connection to WebSocket.
///
/// The roster slot is reserved before the upgrade response is sent, so a
/// client is either refused with 503 or fully admitted.
///
/// # Errors
///
/// Returns [`ChatError::RelayFull`] (503) when the roster is at capacity.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Result<Response, ChatError> {
    let id = ConnectionId::new();
    state.roster.admit(id).await?;

    let event_rx = state.event_bus.subscribe();
    let roster = Arc::clone(&state.roster);

    Ok(ws
        .on_failed_upgrade(move |e| {
            tracing::warn!(connection = %id, error = %e, "websocket upgrade failed");
            tokio::spawn(async move {
                let _ = roster.remove(id).await;
            });
        })
        .on_upgrade(move |socket| run_connection(socket, id, event_rx, state))
        .into_response())
}

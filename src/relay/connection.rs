//! Per-connection relay loop.
//!
//! Handles the read/write loop for a single WebSocket connection: the
//! first text frame names the connection, every later frame is relayed
//! according to the [`RelayMode`], and bus events addressed to this
//! connection are forwarded to the socket.

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::app_state::AppState;
use crate::config::RelayMode;
use crate::domain::{ConnectionId, DisplayName, Origin, RelayEvent};

/// Label used for connections whose name frame was blank.
pub const ANONYMOUS: &str = "anonymous";

/// What the connection loop should do with an inbound text frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// The frame was the connection's display name.
    Named(Option<DisplayName>),
    /// Publish this text on the bus for everyone else.
    Publish(String),
    /// Send this text straight back to the sender.
    Echo(String),
}

/// Protocol state of one relay connection.
#[derive(Debug)]
pub struct Session {
    mode: RelayMode,
    label: Option<String>,
}

impl Session {
    /// Creates a session that has not seen its name frame yet.
    #[must_use]
    pub const fn new(mode: RelayMode) -> Self {
        Self { mode, label: None }
    }

    /// Classifies an inbound text frame and advances the session.
    pub fn on_text(&mut self, text: &str) -> Inbound {
        let Some(label) = &self.label else {
            let name = DisplayName::parse(text).ok();
            self.label = Some(
                name.as_ref()
                    .map_or_else(|| ANONYMOUS.to_string(), ToString::to_string),
            );
            return Inbound::Named(name);
        };

        match self.mode {
            RelayMode::Broadcast => Inbound::Publish(format!("{label}: {text}")),
            RelayMode::Echo => Inbound::Echo(text.to_string()),
        }
    }

    /// Name the connection is known by, once announced.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Runs the read/write loop for a single WebSocket connection.
///
/// The connection must already hold a roster slot (see
/// [`super::handler::ws_handler`]); the slot is released when the loop ends.
pub async fn run_connection(
    socket: WebSocket,
    id: ConnectionId,
    mut event_rx: broadcast::Receiver<RelayEvent>,
    state: AppState,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    tracing::info!(connection = %id, "connection opened, waiting for name");

    let mut session = Session::new(state.mode);

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                let text = match msg {
                    Some(Ok(Message::Text(text))) => text.as_str().to_owned(),
                    Some(Ok(Message::Binary(data))) => match std::str::from_utf8(&data) {
                        Ok(text) => text.to_owned(),
                        Err(_) => {
                            tracing::debug!(connection = %id, "dropping non-UTF-8 binary frame");
                            continue;
                        }
                    },
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        tracing::debug!(connection = %id, error = %e, "ws receive failed");
                        break;
                    }
                };

                match session.on_text(&text) {
                    Inbound::Named(name) => {
                        tracing::info!(connection = %id, name = session.label().unwrap_or(ANONYMOUS), "connection named");
                        if let Some(name) = name {
                            state.roster.set_name(id, name).await;
                        }
                    }
                    Inbound::Publish(line) => {
                        let delivered = state.event_bus.publish(RelayEvent::Frame {
                            origin: Origin::Connection(id),
                            text: line,
                        });
                        tracing::debug!(connection = %id, delivered, "frame published");
                    }
                    Inbound::Echo(line) => {
                        if ws_tx.send(Message::text(line)).await.is_err() {
                            break;
                        }
                    }
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(event) if event.is_for(id) => match event {
                        RelayEvent::Frame { text, .. } => {
                            if ws_tx.send(Message::text(text)).await.is_err() {
                                break;
                            }
                        }
                        RelayEvent::Shutdown { reason } => {
                            let _ = ws_tx.send(close_message(close_code::AWAY, reason)).await;
                            break;
                        }
                    },
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(connection = %id, lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    let name = state.roster.remove(id).await;
    tracing::info!(
        connection = %id,
        name = name.as_ref().map_or(ANONYMOUS, DisplayName::as_str),
        "connection closed"
    );
}

fn close_message(code: u16, reason: String) -> Message {
    Message::Close(Some(CloseFrame {
        code,
        reason: reason.into(),
    }))
}

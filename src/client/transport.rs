//! WebSocket transport handle for the chat widget.
//!
//! [`TransportHandle::open`] returns immediately; the connection is made
//! by a background task that reports progress as [`TransportEvent`]s.
//! There is exactly one connection attempt: no retry, no reconnect, no
//! heartbeat.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::error::ChatError;

/// How long [`TransportHandle::close`] waits for the close handshake.
const CLOSE_GRACE: Duration = Duration::from_millis(500);

/// Observable transport reactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The handshake completed; frames can be sent.
    Opened,
    /// One inbound text frame.
    Frame(String),
    /// The connection attempt or the stream failed.
    Error(String),
    /// The connection is gone. Always the last event.
    Closed {
        /// Peer-supplied close reason, `None` if absent or empty.
        reason: Option<String>,
    },
}

#[derive(Debug)]
enum Outbound {
    Text(String),
    Close,
}

/// Sending half of the widget's single connection.
///
/// Dropping the handle also ends the connection, but without waiting for
/// the close frame to go out; prefer [`TransportHandle::close`].
#[derive(Debug)]
pub struct TransportHandle {
    outbound: mpsc::UnboundedSender<Outbound>,
    task: Option<JoinHandle<()>>,
}

impl TransportHandle {
    /// Starts connecting to `url` in a background task.
    ///
    /// Must be called from within a Tokio runtime. Events arrive on the
    /// returned receiver; the last one is always [`TransportEvent::Closed`].
    pub fn open(url: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let url = url.into();
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run_connection(url, outbound_rx, events_tx));

        (
            Self {
                outbound,
                task: Some(task),
            },
            events_rx,
        )
    }

    /// Queues one text frame.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::TransportClosed`] if the connection task has
    /// already ended.
    pub fn send(&self, text: impl Into<String>) -> Result<(), ChatError> {
        self.outbound
            .send(Outbound::Text(text.into()))
            .map_err(|_| ChatError::TransportClosed)
    }

    /// Closes the socket normally and waits (briefly) for the connection
    /// task to finish, so the close frame reaches the peer before the
    /// runtime shuts down.
    pub async fn close(mut self) {
        let _ = self.outbound.send(Outbound::Close);
        let Some(task) = self.task.take() else {
            return;
        };
        if tokio::time::timeout(CLOSE_GRACE, task).await.is_err() {
            tracing::warn!("connection task did not finish closing in time");
        }
    }

    #[cfg(test)]
    pub(crate) fn detached() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel();
        let (text_tx, text_rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(Outbound::Text(text)) = outbound_rx.recv().await {
                if text_tx.send(text).is_err() {
                    break;
                }
            }
        });
        (
            Self {
                outbound,
                task: None,
            },
            text_rx,
        )
    }
}

async fn run_connection(
    url: String,
    mut outbound_rx: mpsc::UnboundedReceiver<Outbound>,
    events: mpsc::UnboundedSender<TransportEvent>,
) {
    let ws = match connect_async(url.as_str()).await {
        Ok((ws, _response)) => ws,
        Err(e) => {
            tracing::error!(%url, error = %e, "connection failed");
            let _ = events.send(TransportEvent::Error(e.to_string()));
            let _ = events.send(TransportEvent::Closed { reason: None });
            return;
        }
    };
    tracing::info!(%url, "connection open");
    let _ = events.send(TransportEvent::Opened);

    let (mut sink, mut stream) = ws.split();

    let reason = loop {
        tokio::select! {
            out = outbound_rx.recv() => match out {
                Some(Outbound::Text(text)) => {
                    if let Err(e) = sink.send(Message::text(text)).await {
                        tracing::error!(error = %e, "send failed");
                        let _ = events.send(TransportEvent::Error(e.to_string()));
                        break None;
                    }
                }
                Some(Outbound::Close) | None => {
                    let _ = sink.close().await;
                    break None;
                }
            },
            msg = stream.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    let _ = events.send(TransportEvent::Frame(text.as_str().to_owned()));
                }
                Some(Ok(Message::Binary(data))) => match std::str::from_utf8(&data) {
                    Ok(text) => {
                        let _ = events.send(TransportEvent::Frame(text.to_owned()));
                    }
                    Err(_) => tracing::debug!(len = data.len(), "dropping non-UTF-8 binary frame"),
                },
                Some(Ok(Message::Close(frame))) => {
                    // Flushes the queued close reply.
                    let _ = sink.close().await;
                    break frame
                        .map(|f| f.reason.as_str().to_owned())
                        .filter(|reason| !reason.is_empty());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!(error = %e, "receive failed");
                    let _ = events.send(TransportEvent::Error(e.to_string()));
                    break None;
                }
                None => break None,
            },
        }
    };

    tracing::info!(reason = reason.as_deref().unwrap_or(""), "connection closed");
    let _ = events.send(TransportEvent::Closed { reason });
}

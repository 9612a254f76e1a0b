//! Widget input events.
//!
//! Events originate from two sources:
//! - Keyboard input and the render tick.
//! - Transport notifications, converted from [`TransportEvent`].

use super::input::KeyInput;
use crate::client::TransportEvent;

/// Events processed by the [`super::ChatWidget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Keyboard input.
    Key(KeyInput),
    /// Periodic tick; advances banner timers.
    Tick,
    /// Terminal resized.
    Resize,
    /// The connection opened.
    Opened,
    /// An inbound frame.
    FrameReceived(String),
    /// The transport reported an error.
    TransportError(String),
    /// The connection closed.
    Closed {
        /// Peer-supplied reason, if any.
        reason: Option<String>,
    },
}

impl From<TransportEvent> for WidgetEvent {
    fn from(event: TransportEvent) -> Self {
        match event {
            TransportEvent::Opened => Self::Opened,
            TransportEvent::Frame(text) => Self::FrameReceived(text),
            TransportEvent::Error(message) => Self::TransportError(message),
            TransportEvent::Closed { reason } => Self::Closed { reason },
        }
    }
}

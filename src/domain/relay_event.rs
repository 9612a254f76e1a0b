//! Events fanned out to every relay connection.
//!
//! Every relayed chat frame and the operator's shutdown command travel
//! through the [`super::EventBus`] as a [`RelayEvent`]. Each connection
//! task decides for itself whether an event concerns it.

use super::ConnectionId;

/// Where a relayed frame came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A connected chat client.
    Connection(ConnectionId),
    /// The relay operator's console.
    Operator,
}

/// Event published on the relay's event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// A text frame to forward to connected clients.
    Frame {
        /// Publisher of the frame.
        origin: Origin,
        /// Text payload, already formatted for display.
        text: String,
    },

    /// The relay is going down; connections close with `reason`.
    Shutdown {
        /// Close reason sent to clients.
        reason: String,
    },
}

impl RelayEvent {
    /// Returns `true` if the connection `id` should receive this event.
    ///
    /// Frames are never delivered back to the connection that sent them;
    /// shutdowns reach everyone.
    #[must_use]
    pub fn is_for(&self, id: ConnectionId) -> bool {
        match self {
            Self::Frame { origin, .. } => *origin != Origin::Connection(id),
            Self::Shutdown { .. } => true,
        }
    }
}

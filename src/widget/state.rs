//! Observable connection state.

/// Connection state as seen by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Handshake in progress.
    #[default]
    Connecting,
    /// Frames can be sent.
    Open,
    /// The connection is gone for good.
    Closed,
}

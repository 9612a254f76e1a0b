//! Scrollback entries.

/// Which side of the scrollback a bubble sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Typed locally; right-aligned.
    Sent,
    /// Arrived from the relay; left-aligned.
    Received,
}

/// One rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    /// Message text, verbatim.
    pub text: String,
    /// Alignment side.
    pub side: Side,
}

impl Bubble {
    /// A bubble for text the user sent.
    #[must_use]
    pub fn sent(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            side: Side::Sent,
        }
    }

    /// A bubble for a frame received from the relay.
    #[must_use]
    pub fn received(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            side: Side::Received,
        }
    }
}

//! Widget side effects.
//!
//! [`WidgetAction`]s are instructions produced by the
//! [`super::ChatWidget`] for the runtime to execute.

use crate::domain::DisplayName;

/// Actions produced by the widget state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    /// Redraw the view.
    Render,
    /// Transmit one text frame.
    SendFrame(String),
    /// Persist the display name.
    StoreName(DisplayName),
    /// Leave the application.
    Quit,
}

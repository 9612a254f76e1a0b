//! Terminal front end for the chat widget.
//!
//! Rendering functions convert [`ChatWidget`] state into ratatui widget
//! trees and never perform I/O; [`runtime`] owns the terminal, the
//! keyboard stream and the transport.

mod chat;
mod input;
pub mod keys;
mod overlay;
pub mod runtime;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::widget::ChatWidget;

pub use chat::{bubble_lines, window};

/// Render the entire view.
pub fn render(frame: &mut Frame, widget: &ChatWidget) {
    const CHAT_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(CHAT_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [chat_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    chat::render(frame, widget, *chat_area);
    input::render(frame, widget, *input_area);
    status::render(frame, widget, *status_area);

    if let Some((banner, phase)) = widget.banner() {
        overlay::render_banner(frame, banner, phase, *chat_area);
    }
    if let Some(prompt) = widget.prompt() {
        overlay::render_prompt(frame, prompt, frame.area());
    }
}

//! Status bar
//!
//! Displays connection status and the display name.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::widget::{ChatWidget, ConnectionState};

/// Render the status bar.
pub fn render(frame: &mut Frame, widget: &ChatWidget, area: Rect) {
    let connection_status = match widget.connection_state() {
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        }
        ConnectionState::Open => Span::styled(
            "Connected",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        ConnectionState::Closed => Span::styled("Disconnected", Style::default().fg(Color::Red)),
    };

    let name = widget
        .name()
        .map_or_else(String::new, |name| format!(" | {name}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::raw(name),
        Span::styled(" | Esc close notice | Ctrl+C quit", Style::default().fg(Color::Gray)),
    ]);

    let paragraph = Paragraph::new(status_line)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}

//! Input line
//!
//! Displays the chat input with its cursor.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::widget::{ChatWidget, InputBuffer};

const PROMPT_WIDTH: u16 = 3; // "> "
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the input line. The cursor is only placed here when no
/// overlay owns the keyboard.
pub fn render(frame: &mut Frame, widget: &ChatWidget, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Enter or Ctrl+S to send ");

    let input = widget.input();
    let paragraph = Paragraph::new(format!("> {}", input.text()))
        .style(Style::default().fg(Color::Yellow))
        .block(block);
    frame.render_widget(paragraph, area);

    if widget.prompt().is_none() {
        frame.set_cursor_position(cursor_position(input, area, PROMPT_WIDTH));
    }
}

/// Cursor cell for `input` drawn at `prefix` columns inside `area`.
pub fn cursor_position(input: &InputBuffer, area: Rect, prefix: u16) -> (u16, u16) {
    let available_width = area.width.saturating_sub(prefix + RIGHT_PADDING);
    let cursor_offset = u16::try_from(input.cursor())
        .unwrap_or(u16::MAX)
        .min(available_width);

    let cursor_x = area.x.saturating_add(prefix).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);
    (cursor_x.min(max_x), cursor_y)
}

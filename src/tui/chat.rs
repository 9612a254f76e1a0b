//! Scrollback area
//!
//! Received bubbles hug the left edge, sent bubbles the right edge. Long
//! messages wrap at three quarters of the available width.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::widget::{Bubble, ChatWidget, Side};

const BORDER_SIZE: u16 = 2;

/// Render the scrollback.
pub fn render(frame: &mut Frame, widget: &ChatWidget, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" parlor ");

    let inner_width = area.width.saturating_sub(BORDER_SIZE);
    let visible_height = usize::from(area.height.saturating_sub(BORDER_SIZE));
    let lines = window(
        bubble_lines(widget.scrollback(), inner_width),
        visible_height,
        widget.scroll_back(),
    );

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Lays out bubbles as aligned, pre-wrapped lines, oldest first.
pub fn bubble_lines(bubbles: &[Bubble], width: u16) -> Vec<Line<'static>> {
    let max_width = usize::from((width / 4 * 3).max(1));

    bubbles
        .iter()
        .flat_map(|bubble| {
            let (style, alignment) = match bubble.side {
                Side::Sent => (Style::default().fg(Color::Cyan), Alignment::Right),
                Side::Received => (Style::default().fg(Color::White), Alignment::Left),
            };
            wrap(&bubble.text, max_width)
                .into_iter()
                .map(move |piece| Line::styled(piece, style).alignment(alignment))
        })
        .collect()
}

/// Returns the `height` lines ending `back` lines before the newest one.
pub fn window<T>(lines: Vec<T>, height: usize, back: usize) -> Vec<T> {
    let total = lines.len();
    let back = back.min(total.saturating_sub(height));
    let end = total - back;
    let start = end.saturating_sub(height);
    lines.into_iter().skip(start).take(end - start).collect()
}

fn wrap(text: &str, max_width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            pieces.push(String::new());
            continue;
        }
        pieces.extend(chars.chunks(max_width).map(|chunk| chunk.iter().collect::<String>()));
    }
    pieces
}

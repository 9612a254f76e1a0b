//! Overlays drawn above the chat: the disconnect banner and the name
//! prompt.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::input::cursor_position;
use crate::widget::{Banner, BannerPhase, NamePrompt};

const BANNER_HEIGHT: u16 = 3;
const PROMPT_WIDTH: u16 = 44;
const PROMPT_HEIGHT: u16 = 5;

/// Render the banner across the top of `area`. Fading banners are dimmed.
pub fn render_banner(frame: &mut Frame, banner: &Banner, phase: BannerPhase, area: Rect) {
    let mut style = Style::default().fg(Color::Black).bg(Color::Yellow);
    match phase {
        BannerPhase::Visible => {}
        BannerPhase::Fading => style = style.add_modifier(Modifier::DIM),
        BannerPhase::Removed => return,
    }

    let rect = Rect {
        height: BANNER_HEIGHT.min(area.height),
        ..area
    };
    let block = Block::default().borders(Borders::ALL).title(" Esc to close ");

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(banner.text().to_string()).style(style).block(block),
        rect,
    );
}

/// Render the blocking name prompt centred in `area`.
pub fn render_prompt(frame: &mut Frame, prompt: &NamePrompt, area: Rect) {
    let rect = centered(area, PROMPT_WIDTH, PROMPT_HEIGHT);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Choose a display name ");

    let hint = prompt.hint().map_or_else(
        || Line::styled("Enter to join", Style::default().fg(Color::DarkGray)),
        |hint| Line::styled(hint, Style::default().fg(Color::Red)),
    );
    let body = vec![
        Line::raw(format!("> {}", prompt.field().text())),
        Line::raw(""),
        hint,
    ];

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(body).block(block), rect);
    frame.set_cursor_position(cursor_position(prompt.field(), rect, 3));
}

/// A `width` x `height` rectangle centred in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

//! Window chrome — bordered block with a themed title bar and badge.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::theme::{style_border, Palette, C_NUMBER_HINT};

/// A badge shown in the top-right of the title bar (e.g. "LIVE", "3 items").
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

/// A window block: "[N] title" on the title bar, badge on the right and a
/// close glyph when `closable`.
pub fn window_chrome<'a>(
    title: &'a str,
    number_key: Option<char>,
    focused: bool,
    closable: bool,
    badge: Option<Badge<'a>>,
    palette: &Palette,
) -> Block<'a> {
    let title_bg = if focused {
        palette.title_bar
    } else {
        palette.title_bar_inactive
    };
    let title_style = Style::default()
        .fg(palette.title_fg)
        .bg(title_bg)
        .add_modifier(if focused {
            Modifier::BOLD
        } else {
            Modifier::empty()
        });

    let mut title_spans = Vec::new();
    if let Some(key) = number_key {
        title_spans.push(Span::styled(
            format!("[{}] ", key),
            Style::default().fg(C_NUMBER_HINT).bg(title_bg),
        ));
    }
    title_spans.push(Span::styled(format!(" {} ", title), title_style));

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style_border(palette, focused))
        .style(Style::default().bg(palette.window_bg))
        .title(Line::from(title_spans));

    let mut right = Vec::new();
    if let Some(b) = badge {
        right.push(Span::styled(
            format!(" {} ", b.text),
            Style::default().fg(b.color).add_modifier(Modifier::BOLD),
        ));
    }
    if closable {
        right.push(Span::styled(
            " ✕ ",
            Style::default().fg(palette.title_fg).bg(Color::Rgb(200, 60, 50)),
        ));
    }
    if !right.is_empty() {
        block = block.title_top(Line::from(right).right_aligned());
    }
    block
}

/// Clear `area` and draw the chrome; returns the inner content area.
pub fn draw_window(frame: &mut Frame, area: Rect, block: Block<'_>) -> Rect {
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    inner
}

/// The close glyph's cell on the top border, for mouse hit tests.
pub fn close_button_area(area: Rect) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(4),
        y: area.y,
        width: 3,
        height: 1,
    }
}

//! Smooth Unicode progress bar for course completion.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MUTED, C_SECONDARY};

const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Bar of `width` cells filled to `percent` (0..=100) using eighth blocks.
pub fn bar_string(percent: u8, width: usize) -> String {
    let eighths = (percent.min(100) as usize * width * 8) / 100;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    let mut bar = String::with_capacity(width + 4);
    for _ in 0..full_blocks {
        bar.push('█');
    }
    if full_blocks < width {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..width {
            bar.push(' ');
        }
    }
    bar
}

/// Render "label ▕████▌    ▏ 33%" in one row.
pub fn draw_progress(frame: &mut Frame, area: Rect, percent: u8, label: &str, color: Color) {
    if area.width < 8 || area.height == 0 {
        return;
    }
    let right = format!(" {:>3}%", percent.min(100));
    let label_w = label.chars().count() + right.len() + 3;
    let bar_w = (area.width as usize).saturating_sub(label_w).max(4);

    let spans = vec![
        Span::styled(format!("{} ", label), Style::default().fg(C_SECONDARY)),
        Span::styled("▕", Style::default().fg(C_MUTED)),
        Span::styled(bar_string(percent, bar_w), Style::default().fg(color)),
        Span::styled("▏", Style::default().fg(C_MUTED)),
        Span::styled(right, Style::default().fg(C_SECONDARY)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

//! Category tab strip: " All │ VR │ AR │ XR │ Web ".

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;
use vrlab_core::filter::{CategoryFilter, FilterState};

use crate::theme::{category_color, Palette, C_MUTED, C_SECONDARY, C_SEPARATOR};

const SEP: &str = "│";

fn tab_label(tab: &CategoryFilter) -> String {
    format!(" {} ", tab.label())
}

pub fn draw_filter_tabs(frame: &mut Frame, area: Rect, filter: &FilterState, palette: &Palette) {
    let active = filter.position();
    let mut spans = Vec::new();
    for (i, tab) in filter.tabs().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(SEP, Style::default().fg(C_SEPARATOR)));
        }
        let style = if i == active {
            let bg = match tab {
                CategoryFilter::All => palette.accent,
                CategoryFilter::Only(c) => category_color(c.as_str()),
            };
            Style::default()
                .fg(palette.title_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        spans.push(Span::styled(tab_label(tab), style));
    }
    spans.push(Span::styled("  ←/→", Style::default().fg(C_MUTED)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Which tab sits under column `col` of a strip drawn at `area`.
pub fn tab_at(area: Rect, filter: &FilterState, col: u16) -> Option<usize> {
    let mut x = area.x;
    for (i, tab) in filter.tabs().iter().enumerate() {
        if i > 0 {
            x += SEP.width() as u16;
        }
        let w = tab_label(tab).width() as u16;
        if col >= x && col < x + w {
            return Some(i);
        }
        x += w;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrlab_core::catalog::Category;

    #[test]
    fn test_tab_hit_testing() {
        let filter = FilterState::new([Category::new("VR"), Category::new("Web")]);
        let area = Rect::new(10, 0, 40, 1);
        // " All " spans 10..15, separator at 15, " VR " 16..20.
        assert_eq!(tab_at(area, &filter, 10), Some(0));
        assert_eq!(tab_at(area, &filter, 15), None);
        assert_eq!(tab_at(area, &filter, 17), Some(1));
        assert_eq!(tab_at(area, &filter, 22), Some(2));
        assert_eq!(tab_at(area, &filter, 39), None);
    }
}

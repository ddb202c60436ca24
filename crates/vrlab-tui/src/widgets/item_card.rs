//! One card renderer for every catalog item.
//!
//! Standard cards take two rows. Featured cards add a highlighted third row
//! with the item's features or stats.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};
use vrlab_core::catalog::{CardVariant, CatalogItem, ItemStatus};

use crate::theme::{
    category_color, Palette, C_LIVE, C_MUTED, C_PRIMARY, C_SECONDARY, C_STARS, C_TAG,
    C_TOAST_WARNING,
};

/// "★★★★☆ 4.8"
pub fn stars(rating: f32, filled: u8) -> String {
    let filled = filled.min(5) as usize;
    format!("{}{} {:.1}", "★".repeat(filled), "☆".repeat(5 - filled), rating)
}

pub fn card_height(item: &CatalogItem) -> u16 {
    match item.variant {
        CardVariant::Standard => 2,
        CardVariant::Featured => 3,
    }
}

fn status_span(status: ItemStatus) -> Span<'static> {
    let color = match status {
        ItemStatus::Available => C_LIVE,
        ItemStatus::Beta => C_TOAST_WARNING,
        ItemStatus::ComingSoon => C_MUTED,
    };
    Span::styled(format!(" {} ", status.label()), Style::default().fg(color))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn card<'a>(item: &CatalogItem, width: u16, palette: &Palette) -> ListItem<'a> {
    let featured = item.variant == CardVariant::Featured;
    let title_style = if featured {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    };

    let glyph = if item.glyph.is_empty() { "•" } else { item.glyph.as_str() };
    let mut head = vec![
        Span::styled(format!(" {} ", glyph), Style::default().fg(palette.accent)),
        Span::styled(item.title.clone(), title_style),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", item.category.as_str()),
            Style::default().fg(category_color(item.category.as_str())),
        ),
    ];
    if let Some(status) = item.status {
        head.push(status_span(status));
    }
    if let (Some(rating), Some(filled)) = (item.rating, item.star_count()) {
        head.push(Span::styled(
            format!(" {}", stars(rating, filled)),
            Style::default().fg(C_STARS),
        ));
    }
    if let Some(price) = &item.price {
        head.push(Span::styled(
            format!("  {}", price),
            Style::default().fg(C_SECONDARY),
        ));
    }
    if item.capabilities.detail {
        head.push(Span::styled("  ›", Style::default().fg(C_MUTED)));
    }

    let desc_w = (width as usize).saturating_sub(4);
    let mut lines = vec![
        Line::from(head),
        Line::from(Span::styled(
            format!("    {}", truncate(&item.description, desc_w)),
            Style::default().fg(C_SECONDARY),
        )),
    ];

    if featured {
        let extra = match (&item.stats, item.features.is_empty()) {
            (Some(stats), _) => {
                let mut parts = Vec::new();
                if let Some(v) = stats.views {
                    parts.push(format!("{} views", v));
                }
                if let Some(u) = stats.users {
                    parts.push(format!("{} users", u));
                }
                if let Some(d) = stats.last_updated {
                    parts.push(format!("updated {}", d.format("%b %-d, %Y")));
                }
                parts.join(" · ")
            }
            (None, false) => item.features.join(" · "),
            (None, true) => item.tags.join(" · "),
        };
        lines.push(Line::from(Span::styled(
            format!("    ★ {}", truncate(&extra, desc_w.saturating_sub(2))),
            Style::default().fg(C_TAG),
        )));
    }

    ListItem::new(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrlab_core::catalog::Content;

    #[test]
    fn test_stars_format() {
        assert_eq!(stars(4.8, 4), "★★★★☆ 4.8");
        assert_eq!(stars(5.0, 9), "★★★★★ 5.0");
    }

    #[test]
    fn test_card_height_matches_lines() {
        let content = Content::embedded().unwrap();
        let palette = crate::theme::palette(Default::default());
        for item in content.projects.items() {
            let rendered = card(item, 60, palette);
            assert_eq!(rendered.height() as u16, card_height(item), "{}", item.id);
        }
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}

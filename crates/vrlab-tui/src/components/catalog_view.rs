//! CatalogView — filterable card grid with drill-down, shared by the
//! launcher tools, the art studio and the project gallery.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListState, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use vrlab_core::catalog::{Catalog, CatalogItem};
use vrlab_core::drilldown::DrillDown;
use vrlab_core::filter::FilterState;

use crate::{
    action::{Action, CatalogKind, ItemRef, QrTarget},
    theme::{
        category_color, style_muted, style_secondary, style_selected, style_selected_focused,
        Palette, C_LIVE, C_PRIMARY, C_SECONDARY, C_STARS, C_TAG,
    },
    widgets::{
        filter_input::{search_matches, FilterAction, FilterInput},
        filter_tabs::{draw_filter_tabs, tab_at},
        item_card::{card, card_height, stars},
        scrollable_list::ScrollableList,
    },
};

pub struct CatalogView {
    kind: CatalogKind,
    list: ScrollableList<CatalogItem>,
    filter: FilterState,
    search: FilterInput,
    drill: DrillDown,
    list_state: ListState,
    show_tabs: bool,
    tabs_area: Rect,
    list_area: Rect,
}

fn haystack(item: &CatalogItem) -> String {
    let mut text = format!(
        "{} {} {}",
        item.title,
        item.description,
        item.category.as_str()
    );
    for word in item.tags.iter().chain(item.features.iter()) {
        text.push(' ');
        text.push_str(word);
    }
    text
}

impl CatalogView {
    pub fn new(kind: CatalogKind, catalog: &Catalog, show_tabs: bool) -> Self {
        let mut list = ScrollableList::new();
        list.set_items(catalog.items().to_vec());
        Self {
            kind,
            list,
            filter: catalog.filter_state(),
            search: FilterInput::new("search title, description, tags..."),
            drill: DrillDown::default(),
            list_state: ListState::default(),
            show_tabs,
            tabs_area: Rect::default(),
            list_area: Rect::default(),
        }
    }

    pub fn is_filtering(&self) -> bool {
        self.search.is_active()
    }

    pub fn is_detail(&self) -> bool {
        self.drill.is_detail()
    }

    /// Esc belongs to the view while searching or in detail.
    pub fn wants_escape(&self) -> bool {
        self.search.is_active() || self.drill.is_detail()
    }

    pub fn visible_count(&self) -> usize {
        self.list.len()
    }

    fn refilter(&mut self) {
        let filter = &self.filter;
        let query = self.search.text();
        self.list
            .refilter(|item| filter.matches(item) && search_matches(query, &haystack(item)));
    }

    fn detail_item(&self) -> Option<&CatalogItem> {
        let id = self.drill.selected()?;
        self.list.items.iter().find(|item| item.id == *id)
    }

    /// The item keys act on: the detail item, else the cursor.
    fn current(&self) -> Option<&CatalogItem> {
        if self.drill.is_detail() {
            return self.detail_item();
        }
        self.list.selected_item()
    }

    fn item_ref(&self, item: &CatalogItem) -> ItemRef {
        ItemRef {
            catalog: self.kind,
            id: item.id.clone(),
        }
    }

    /// Enter on the cursor: drill in, follow the item's destination, or launch.
    fn activate(&mut self) -> Vec<Action> {
        let Some(item) = self.list.selected_item() else {
            return vec![];
        };
        if self.drill.select(item) {
            debug!("detail: {}", item.id);
            return vec![];
        }
        if let Some(dest) = item.opens {
            return vec![Action::OpenDestination(dest)];
        }
        vec![Action::Launch(self.item_ref(item))]
    }

    fn item_actions(&self, code: KeyCode) -> Vec<Action> {
        let Some(item) = self.current() else {
            return vec![];
        };
        match code {
            KeyCode::Char('o') => vec![Action::Launch(self.item_ref(item))],
            KeyCode::Char('r') if item.capabilities.qr => match item.share_payload() {
                Some(share) => vec![Action::ShowQr(QrTarget {
                    title: item.title.clone(),
                    share,
                })],
                None => vec![],
            },
            KeyCode::Char('s') if item.capabilities.share => match item.share_payload() {
                Some(payload) => vec![Action::Share(payload)],
                None => vec![],
            },
            KeyCode::Char('y') => match &item.url {
                Some(url) => vec![Action::CopyLink(url.clone())],
                None => vec![Action::Unavailable(item.title.clone())],
            },
            _ => vec![],
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        if self.search.is_active() {
            match key.code {
                KeyCode::Up => {
                    self.list.select_up(1);
                    return vec![];
                }
                KeyCode::Down => {
                    self.list.select_down(1);
                    return vec![];
                }
                _ => {}
            }
            return match self.search.handle_key(key) {
                FilterAction::Changed => {
                    self.refilter();
                    vec![]
                }
                FilterAction::Confirmed => vec![Action::CloseFilter],
                FilterAction::Cancelled => {
                    self.refilter();
                    vec![Action::CloseFilter]
                }
            };
        }

        if self.drill.is_detail() {
            return match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                    self.drill.back();
                    vec![]
                }
                KeyCode::Enter => self.item_actions(KeyCode::Char('o')),
                code => self.item_actions(code),
            };
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Left | KeyCode::Char('h') if self.show_tabs => {
                if self.filter.cycle_prev() {
                    self.refilter();
                }
            }
            KeyCode::Right | KeyCode::Char('l') if self.show_tabs => {
                if self.filter.cycle_next() {
                    self.refilter();
                }
            }
            KeyCode::Char('/') => {
                self.search.activate();
                return vec![Action::OpenFilter];
            }
            KeyCode::Enter => return self.activate(),
            code => return self.item_actions(code),
        }
        vec![]
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let (col, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                if self.drill.is_detail() {
                    return vec![];
                }
                if self.show_tabs && row == self.tabs_area.y && self.tabs_area.width > 0 {
                    if let Some(pos) = tab_at(self.tabs_area, &self.filter, col) {
                        if self.filter.set_by_position(pos) {
                            self.refilter();
                        }
                    }
                    return vec![];
                }
                if let Some(pos) = self.row_to_position(row) {
                    if pos == self.list.selected {
                        return self.activate();
                    }
                    self.list.select_visible(pos);
                }
            }
            _ => {}
        }
        vec![]
    }

    /// Map a screen row inside the list to a filtered position, accounting
    /// for variable card heights and the list's scroll offset.
    fn row_to_position(&self, row: u16) -> Option<usize> {
        let area = self.list_area;
        if area.height == 0 || row < area.y || row >= area.y + area.height {
            return None;
        }
        let mut y = area.y;
        for (pos, item) in self.list.visible().enumerate().skip(self.list_state.offset()) {
            let h = card_height(item);
            if row < y + h {
                return Some(pos);
            }
            y += h;
            if y >= area.y + area.height {
                break;
            }
        }
        None
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, palette: &Palette) {
        if let Some(item) = self.detail_item().cloned() {
            self.tabs_area = Rect::default();
            self.list_area = Rect::default();
            draw_detail(frame, area, &item, palette);
            return;
        }

        let show_search = self.search.is_active() || !self.search.is_empty();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if self.show_tabs { 2 } else { 0 }),
                Constraint::Length(if show_search { 1 } else { 0 }),
                Constraint::Min(0),
            ])
            .split(area);

        if self.show_tabs {
            self.tabs_area = Rect {
                height: 1,
                ..chunks[0]
            };
            draw_filter_tabs(frame, self.tabs_area, &self.filter, palette);
        } else {
            self.tabs_area = Rect::default();
        }
        if show_search {
            self.search.draw(frame, chunks[1], self.visible_count());
        }

        self.list_area = chunks[2];
        if self.list.is_empty() {
            let hint = if self.list.total_len() == 0 {
                "nothing here yet"
            } else {
                "no items match this filter"
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(format!("  {}", hint), style_muted()))),
                chunks[2],
            );
            return;
        }

        let width = chunks[2].width;
        let cards: Vec<_> = self.list.visible().map(|item| card(item, width, palette)).collect();
        let highlight = if focused {
            style_selected_focused()
        } else {
            style_selected()
        };
        let list = List::new(cards)
            .highlight_style(highlight)
            .highlight_symbol("▌");
        self.list_state.select(Some(self.list.selected));
        frame.render_stateful_widget(list, chunks[2], &mut self.list_state);
    }
}

fn draw_detail(frame: &mut Frame, area: Rect, item: &CatalogItem, palette: &Palette) {
    let label = Style::default().fg(C_SECONDARY);
    let mut lines = vec![
        Line::from(Span::styled("‹ Esc back", style_muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{}  ", item.glyph), Style::default().fg(palette.accent)),
            Span::styled(
                item.title.clone(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("[{}]", item.category.as_str()),
                Style::default().fg(category_color(item.category.as_str())),
            ),
            Span::raw("  "),
            Span::styled(item.price.clone().unwrap_or_default(), style_secondary()),
        ]),
    ];
    if let (Some(rating), Some(filled)) = (item.rating, item.star_count()) {
        lines.push(Line::from(Span::styled(
            stars(rating, filled),
            Style::default().fg(C_STARS),
        )));
    }
    if let Some(platform) = &item.platform {
        lines.push(Line::from(vec![
            Span::styled("platform  ", label),
            Span::raw(platform.clone()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::raw(item.description.clone())));

    if !item.features.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "features",
            Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD),
        )));
        for feature in &item.features {
            lines.push(Line::from(vec![
                Span::styled("  ✓ ", Style::default().fg(C_LIVE)),
                Span::raw(feature.clone()),
            ]));
        }
    }

    lines.push(Line::from(""));
    match &item.url {
        Some(url) => {
            lines.push(Line::from(Span::styled(url.clone(), Style::default().fg(C_TAG))));
            lines.push(Line::from(Span::styled(
                "Enter launch  y copy link",
                style_muted(),
            )));
        }
        None => lines.push(Line::from(Span::styled("no link available", style_muted()))),
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrlab_core::catalog::{Content, Destination};
    use vrlab_core::filter::CategoryFilter;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn art_view() -> CatalogView {
        let content = Content::embedded().unwrap();
        CatalogView::new(CatalogKind::ArtStudio, &content.art_studio, true)
    }

    #[test]
    fn test_category_cycle_filters_grid() {
        let mut view = art_view();
        assert_eq!(view.visible_count(), 8);
        view.handle_key(key(KeyCode::Right));
        assert_eq!(view.filter.active().label(), "Professional");
        assert_eq!(view.visible_count(), 5);
        view.handle_key(key(KeyCode::Left));
        assert_eq!(*view.filter.active(), CategoryFilter::All);
        assert_eq!(view.visible_count(), 8);
    }

    #[test]
    fn test_enter_drills_in_and_escape_returns() {
        let mut view = art_view();
        view.handle_key(key(KeyCode::Enter));
        assert!(view.is_detail());
        assert!(view.wants_escape());
        view.handle_key(key(KeyCode::Esc));
        assert!(!view.is_detail());
        assert!(!view.wants_escape());
    }

    #[test]
    fn test_filter_change_keeps_detail() {
        let mut view = art_view();
        view.handle_key(key(KeyCode::Enter));
        view.filter.set_by_position(4);
        view.refilter();
        assert!(view.is_detail());
        assert_eq!(view.current().map(|i| i.title.as_str()), Some("Quill"));
    }

    #[test]
    fn test_search_narrows_and_escape_restores() {
        let mut view = art_view();
        assert!(matches!(
            view.handle_key(key(KeyCode::Char('/')))[..],
            [Action::OpenFilter]
        ));
        for c in "sculpt".chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(view.visible_count(), 1);
        view.handle_key(key(KeyCode::Esc));
        view.handle_key(key(KeyCode::Esc));
        assert!(!view.is_filtering());
        assert_eq!(view.visible_count(), 8);
    }

    #[test]
    fn test_project_enter_launches_or_follows_destination() {
        let content = Content::embedded().unwrap();
        let mut view = CatalogView::new(CatalogKind::Projects, &content.projects, true);
        let actions = view.handle_key(key(KeyCode::Enter));
        assert!(matches!(&actions[..], [Action::Launch(r)] if r.id.as_str() == "hangar-bay"));

        view.handle_key(key(KeyCode::End));
        let actions = view.handle_key(key(KeyCode::Enter));
        assert!(matches!(
            actions[..],
            [Action::OpenDestination(Destination::Course)]
        ));
    }

    #[test]
    fn test_qr_and_share_need_capabilities() {
        let content = Content::embedded().unwrap();
        let mut projects = CatalogView::new(CatalogKind::Projects, &content.projects, true);
        assert!(matches!(
            projects.handle_key(key(KeyCode::Char('r')))[..],
            [Action::ShowQr(_)]
        ));
        assert!(matches!(
            projects.handle_key(key(KeyCode::Char('s')))[..],
            [Action::Share(_)]
        ));

        let mut art = art_view();
        assert!(art.handle_key(key(KeyCode::Char('r'))).is_empty());
        assert!(art.handle_key(key(KeyCode::Char('s'))).is_empty());
    }
}

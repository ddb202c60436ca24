//! Projects page — lab header, stats hero and the filterable project gallery.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use vrlab_core::catalog::Content;

use crate::{
    action::{Action, CatalogKind},
    app_state::AppState,
    component::Component,
    components::catalog_view::CatalogView,
    router::Page,
    theme::{style_muted, C_PRIMARY, C_SECONDARY, C_SEPARATOR},
};

pub struct ProjectGallery {
    view: CatalogView,
}

impl ProjectGallery {
    pub fn new(content: &Content) -> Self {
        Self {
            view: CatalogView::new(CatalogKind::Projects, &content.projects, true),
        }
    }
}

impl Component for ProjectGallery {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if self.view.wants_escape() {
            return self.view.handle_key(key);
        }
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => vec![Action::Back],
            KeyCode::Char('c') => vec![Action::Navigate(Page::Course)],
            _ => self.view.handle_key(key),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        self.view.handle_mouse(event)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = state.palette();
        let lab = &state.content.lab;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(if lab.stats.is_empty() { 0 } else { 2 }),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let header = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(C_SEPARATOR));
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(vec![
                    Span::styled("‹ Esc desktop   ", style_muted()),
                    Span::styled(
                        state.content.projects.title().to_string(),
                        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("{} · {}", lab.name, lab.tagline),
                    Style::default().fg(C_SECONDARY),
                )),
            ])
            .block(header),
            chunks[0],
        );

        if !lab.stats.is_empty() {
            let mut spans = Vec::new();
            for (i, stat) in lab.stats.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("   │   ", Style::default().fg(C_SEPARATOR)));
                }
                spans.push(Span::styled(
                    stat.value.clone(),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(format!(" {}", stat.label), style_muted()));
            }
            frame.render_widget(
                Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
                chunks[1],
            );
        }

        self.view.draw(frame, chunks[2], focused, palette);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{} · {}", lab.location, lab.hours),
                style_muted(),
            )))
            .alignment(Alignment::Center),
            chunks[3],
        );
    }

    fn is_filtering(&self) -> bool {
        self.view.is_filtering()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_escape_goes_back_from_grid() {
        let state = AppState::for_tests();
        let mut gallery = ProjectGallery::new(&state.content);
        assert!(matches!(
            gallery.handle_key(key(KeyCode::Esc), &state)[..],
            [Action::Back]
        ));
    }

    #[test]
    fn test_escape_closes_search_before_leaving() {
        let state = AppState::for_tests();
        let mut gallery = ProjectGallery::new(&state.content);
        gallery.handle_key(key(KeyCode::Char('/')), &state);
        assert!(gallery.is_filtering());
        let actions = gallery.handle_key(key(KeyCode::Esc), &state);
        assert!(!matches!(actions[..], [Action::Back]));
    }
}

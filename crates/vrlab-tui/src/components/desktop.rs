//! Desktop — wallpaper, icon grid and taskbar.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, Window},
    app_state::AppState,
    component::Component,
    router::Page,
};

const ICON_W: u16 = 12;
const ICON_H: u16 = 3;
const START: &str = " ⊞ start ";

pub struct Desktop {
    selected: usize,
    per_column: usize,
    icon_areas: Vec<Rect>,
    start_area: Rect,
    task_buttons: Vec<(Rect, Window)>,
}

impl Desktop {
    pub fn new() -> Self {
        Self {
            selected: 0,
            per_column: 1,
            icon_areas: Vec::new(),
            start_area: Rect::default(),
            task_buttons: Vec::new(),
        }
    }

    /// Where windows may be placed: everything above the taskbar.
    pub fn workspace(area: Rect) -> Rect {
        Rect {
            height: area.height.saturating_sub(1),
            ..area
        }
    }

    fn open_icon(&self, state: &AppState) -> Vec<Action> {
        match state.content.desktop.get(self.selected).and_then(|icon| icon.opens) {
            Some(dest) => vec![Action::OpenDestination(dest)],
            None => vec![],
        }
    }

    fn step(&mut self, delta: isize, count: usize) {
        if count == 0 {
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, count as isize - 1) as usize;
    }
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new()
    }
}

fn hit(r: &Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

impl Component for Desktop {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let count = state.content.desktop.len();
        let column = self.per_column.max(1) as isize;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.step(-1, count),
            KeyCode::Down | KeyCode::Char('j') => self.step(1, count),
            KeyCode::Left | KeyCode::Char('h') => self.step(-column, count),
            KeyCode::Right | KeyCode::Char('l') => self.step(column, count),
            KeyCode::Enter => return self.open_icon(state),
            KeyCode::Char('s') => return vec![Action::ToggleLauncher],
            KeyCode::Char('v') => return vec![Action::OpenTelevision],
            KeyCode::Char('p') => return vec![Action::Navigate(Page::Projects)],
            KeyCode::Char('c') => return vec![Action::Navigate(Page::Course)],
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let MouseEventKind::Down(MouseButton::Left) = event.kind else {
            return vec![];
        };
        let (col, row) = (event.column, event.row);
        if hit(&self.start_area, col, row) {
            return vec![Action::ToggleLauncher];
        }
        if let Some((_, window)) = self.task_buttons.iter().find(|(r, _)| hit(r, col, row)) {
            return vec![Action::FocusPane(window.component())];
        }
        if let Some(i) = self.icon_areas.iter().position(|r| hit(r, col, row)) {
            if i == self.selected {
                return self.open_icon(state);
            }
            self.selected = i;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = state.palette();
        let body = Self::workspace(area);
        frame.render_widget(Block::default().style(Style::default().bg(palette.wallpaper)), body);

        // Watermark.
        if body.height > 4 {
            let mark = Rect {
                y: body.y + body.height - 3,
                height: 2,
                ..body
            };
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(
                        format!("{} ", state.content.lab.name),
                        Style::default()
                            .fg(palette.wallpaper_accent)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("{} ", state.content.lab.tagline),
                        Style::default().fg(palette.wallpaper_accent),
                    )),
                ])
                .alignment(Alignment::Right),
                mark,
            );
        }

        // Icons, filled top to bottom then left to right.
        self.per_column = ((body.height.saturating_sub(1)) / ICON_H).max(1) as usize;
        self.icon_areas.clear();
        for (i, icon) in state.content.desktop.iter().enumerate() {
            let col = (i / self.per_column) as u16;
            let row = (i % self.per_column) as u16;
            let x = body.x + 2 + col * ICON_W;
            let y = body.y + 1 + row * ICON_H;
            if x + ICON_W > body.x + body.width || y + 2 > body.y + body.height {
                break;
            }
            let cell = Rect::new(x, y, ICON_W - 2, 2);
            self.icon_areas.push(cell);

            let selected = i == self.selected;
            let label_style = if selected && focused {
                Style::default()
                    .fg(palette.title_fg)
                    .bg(palette.title_bar)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.taskbar_fg)
            };
            let label: String = icon.label.chars().take((ICON_W - 2) as usize).collect();
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(
                        icon.glyph.clone(),
                        Style::default().fg(palette.taskbar_fg),
                    )),
                    Line::from(Span::styled(label, label_style)),
                ])
                .alignment(Alignment::Center),
                cell,
            );
        }

        // Taskbar.
        let bar = Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(Block::default().style(Style::default().bg(palette.taskbar)), bar);

        self.start_area = Rect::new(bar.x, bar.y, START.width() as u16, 1);
        let mut spans = vec![
            Span::styled(
                START,
                Style::default()
                    .fg(palette.start_fg)
                    .bg(palette.start_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];
        let mut x = bar.x + START.width() as u16 + 1;
        self.task_buttons.clear();
        let windows = [
            (Window::Launcher, state.launcher_window.is_open(), " ◈ VR Lab "),
            (Window::Television, state.tv_window.is_open(), " ▣ YCCC TV "),
        ];
        for (window, open, label) in windows {
            if !open {
                continue;
            }
            let w = label.width() as u16;
            self.task_buttons.push((Rect::new(x, bar.y, w, 1), window));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(palette.taskbar_fg)
                    .bg(palette.title_bar_inactive),
            ));
            spans.push(Span::raw(" "));
            x += w + 1;
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), bar);

        let clock = chrono::Local::now().format("%-I:%M %p").to_string();
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", state.theme.label()),
                    Style::default().fg(palette.taskbar_fg),
                ),
                Span::styled(
                    format!(" {} ", clock),
                    Style::default()
                        .fg(palette.taskbar_fg)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
            .alignment(Alignment::Right),
            bar,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use vrlab_core::catalog::Destination;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_opens_icon_destination() {
        let state = AppState::for_tests();
        let mut desktop = Desktop::new();
        let actions = desktop.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(
            actions[..],
            [Action::OpenDestination(Destination::Launcher)]
        ));
    }

    #[test]
    fn test_icon_without_target_does_nothing() {
        let state = AppState::for_tests();
        let mut desktop = Desktop::new();
        desktop.handle_key(key(KeyCode::Down), &state);
        desktop.handle_key(key(KeyCode::Down), &state);
        assert_eq!(state.content.desktop[desktop.selected].label, "My Computer");
        assert!(desktop.handle_key(key(KeyCode::Enter), &state).is_empty());
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let state = AppState::for_tests();
        let mut desktop = Desktop::new();
        desktop.handle_key(key(KeyCode::Up), &state);
        assert_eq!(desktop.selected, 0);
        for _ in 0..20 {
            desktop.handle_key(key(KeyCode::Right), &state);
        }
        assert_eq!(desktop.selected, state.content.desktop.len() - 1);
    }

    #[test]
    fn test_shortcuts() {
        let state = AppState::for_tests();
        let mut desktop = Desktop::new();
        assert!(matches!(
            desktop.handle_key(key(KeyCode::Char('v')), &state)[..],
            [Action::OpenTelevision]
        ));
        assert!(matches!(
            desktop.handle_key(key(KeyCode::Char('p')), &state)[..],
            [Action::Navigate(Page::Projects)]
        ));
    }
}

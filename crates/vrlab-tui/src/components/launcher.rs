//! Launcher window: the lab's tool grid plus the art studio tab.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use vrlab_core::catalog::Content;
use vrlab_core::modal::DismissReason;

use crate::{
    action::{Action, CatalogKind, LauncherTab, Window},
    app_state::AppState,
    component::Component,
    components::catalog_view::CatalogView,
    theme::{style_muted, C_PRIMARY, C_SECONDARY, C_SEPARATOR},
    widgets::pane_chrome::{close_button_area, draw_window, window_chrome, Badge},
};

const TAB_TOOLS: &str = " 1 Tools ";
const TAB_ART: &str = " 2 Art Studio ";

pub struct Launcher {
    tab: LauncherTab,
    tools: CatalogView,
    art: CatalogView,
    tabs_row: Rect,
    body: Rect,
}

impl Launcher {
    pub fn new(content: &Content) -> Self {
        Self {
            tab: LauncherTab::default(),
            tools: CatalogView::new(CatalogKind::Launcher, &content.launcher, true),
            art: CatalogView::new(CatalogKind::ArtStudio, &content.art_studio, true),
            tabs_row: Rect::default(),
            body: Rect::default(),
        }
    }

    pub fn tab(&self) -> LauncherTab {
        self.tab
    }

    fn view(&self) -> &CatalogView {
        match self.tab {
            LauncherTab::Tools => &self.tools,
            LauncherTab::ArtStudio => &self.art,
        }
    }

    fn view_mut(&mut self) -> &mut CatalogView {
        match self.tab {
            LauncherTab::Tools => &mut self.tools,
            LauncherTab::ArtStudio => &mut self.art,
        }
    }
}

impl Component for Launcher {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if self.view().wants_escape() {
            return self.view_mut().handle_key(key);
        }
        match key.code {
            KeyCode::Esc => vec![Action::CloseWindow(Window::Launcher, DismissReason::Escape)],
            KeyCode::Char('x') => vec![Action::CloseWindow(
                Window::Launcher,
                DismissReason::CloseButton,
            )],
            KeyCode::Char('1') => {
                self.tab = LauncherTab::Tools;
                vec![]
            }
            KeyCode::Char('2') => {
                self.tab = LauncherTab::ArtStudio;
                vec![]
            }
            _ => self.view_mut().handle_key(key),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            let close = close_button_area(area);
            if event.row == close.y
                && event.column >= close.x
                && event.column < close.x + close.width
            {
                return vec![Action::CloseWindow(
                    Window::Launcher,
                    DismissReason::CloseButton,
                )];
            }
            if event.row == self.tabs_row.y && self.tabs_row.width > 0 {
                let split = self.tabs_row.x + TAB_TOOLS.chars().count() as u16;
                self.tab = if event.column < split {
                    LauncherTab::Tools
                } else {
                    LauncherTab::ArtStudio
                };
                return vec![];
            }
        }
        self.view_mut().handle_mouse(event)
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::OpenLauncher(tab) = action {
            self.tab = *tab;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = state.palette();
        let badge = Badge {
            text: state.theme.label(),
            color: palette.accent,
        };
        let block = window_chrome("VR Lab Gateway", None, focused, true, Some(badge), palette);
        let inner = draw_window(frame, area, block);
        if inner.height < 3 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        self.tabs_row = Rect {
            height: 1,
            ..chunks[0]
        };
        let active = Style::default()
            .fg(palette.title_fg)
            .bg(palette.title_bar)
            .add_modifier(Modifier::BOLD);
        let idle = Style::default().fg(C_SECONDARY);
        let (tools_style, art_style) = match self.tab {
            LauncherTab::Tools => (active, idle),
            LauncherTab::ArtStudio => (idle, active),
        };
        let title = match self.tab {
            LauncherTab::Tools => state.content.launcher.title(),
            LauncherTab::ArtStudio => state.content.art_studio.title(),
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(TAB_TOOLS, tools_style),
                Span::styled(TAB_ART, art_style),
                Span::styled("  │  ", Style::default().fg(C_SEPARATOR)),
                Span::styled(
                    title.to_string(),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
            ])),
            self.tabs_row,
        );

        self.body = chunks[1];
        match self.tab {
            LauncherTab::Tools => self.tools.draw(frame, self.body, focused, palette),
            LauncherTab::ArtStudio => {
                if self.art.is_detail() || self.body.width < 70 {
                    self.art.draw(frame, self.body, focused, palette);
                    return;
                }
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                    .split(self.body);
                self.art.draw(frame, cols[0], focused, palette);
                draw_tutorials(frame, cols[1], state);
            }
        }
    }

    fn is_filtering(&self) -> bool {
        self.view().is_filtering()
    }
}

fn draw_tutorials(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = vec![Line::from(Span::styled(
        " Tutorials",
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
    ))];
    for tutorial in &state.content.tutorials {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", tutorial.title),
            Style::default().fg(state.palette().accent),
        )));
        lines.push(Line::from(Span::styled(
            format!(" {}", tutorial.description),
            Style::default().fg(C_SECONDARY),
        )));
        lines.push(Line::from(Span::styled(
            format!(" {} min · {}", tutorial.duration_min, tutorial.level),
            style_muted(),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

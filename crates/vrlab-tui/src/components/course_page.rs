//! Course page: stats, progress, module list and feature highlights.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use vrlab_core::course::{Course, CourseModule, Difficulty};

use crate::{
    action::{Action, QrTarget},
    app_state::AppState,
    component::Component,
    theme::{
        style_muted, style_selected, style_selected_focused, C_LIVE, C_PRIMARY, C_SECONDARY,
        C_SEPARATOR, C_STARS, C_TOAST_ERROR, C_TOAST_WARNING,
    },
    widgets::{progress_bar::draw_progress, scrollable_list::ScrollableList},
};

pub struct CoursePage {
    modules: ScrollableList<CourseModule>,
    list_state: ListState,
    list_area: Rect,
}

fn difficulty_color(d: Difficulty) -> Color {
    match d {
        Difficulty::Beginner => C_LIVE,
        Difficulty::Intermediate => C_TOAST_WARNING,
        Difficulty::Advanced => C_TOAST_ERROR,
    }
}

impl CoursePage {
    pub fn new(course: &Course) -> Self {
        let mut modules = ScrollableList::new();
        modules.set_items(course.modules.clone());
        Self {
            modules,
            list_state: ListState::default(),
            list_area: Rect::default(),
        }
    }
}

impl Component for CoursePage {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let course = &state.content.course;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.modules.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.modules.select_down(1),
            KeyCode::Home | KeyCode::Char('g') => self.modules.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.modules.select_last(),
            KeyCode::Enter | KeyCode::Char('o') => return vec![Action::OpenUrl(course.url.clone())],
            KeyCode::Char('r') => {
                return vec![Action::ShowQr(QrTarget {
                    title: course.title.clone(),
                    share: course.share_payload(),
                })]
            }
            KeyCode::Char('s') => return vec![Action::Share(course.share_payload())],
            KeyCode::Char('y') => return vec![Action::CopyLink(course.url.clone())],
            KeyCode::Esc | KeyCode::Backspace => return vec![Action::Back],
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.modules.select_up(1),
            MouseEventKind::ScrollDown => self.modules.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let area = self.list_area;
                if event.row >= area.y && event.row < area.y + area.height {
                    // Two rows per module.
                    let pos = self.list_state.offset() + ((event.row - area.y) / 2) as usize;
                    self.modules.select_visible(pos);
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = state.palette();
        let course = &state.content.course;

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(2),
                Constraint::Min(4),
            ])
            .split(area);

        let stats = &course.stats;
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("‹ Esc projects", style_muted())),
                Line::from(Span::styled(
                    course.title.clone(),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(course.tagline.clone(), Style::default().fg(C_SECONDARY))),
                Line::from(vec![
                    Span::styled(
                        format!("{} students", stats.students),
                        Style::default().fg(C_PRIMARY),
                    ),
                    Span::styled("  ·  ", Style::default().fg(C_SEPARATOR)),
                    Span::styled(
                        format!("{}% completion", stats.completion_rate),
                        Style::default().fg(C_PRIMARY),
                    ),
                    Span::styled("  ·  ", Style::default().fg(C_SEPARATOR)),
                    Span::styled(format!("★ {:.1}", stats.rating), Style::default().fg(C_STARS)),
                    Span::styled("  ·  ", Style::default().fg(C_SEPARATOR)),
                    Span::styled(course.total_duration_label(), Style::default().fg(C_PRIMARY)),
                ]),
            ]),
            rows[0],
        );

        let progress = Rect {
            y: rows[1].y + 1,
            height: 1,
            ..rows[1]
        };
        let label = format!(
            "your progress {}/{}",
            course.completed_count(),
            course.modules.len()
        );
        draw_progress(frame, progress, course.progress_percent(), &label, C_LIVE);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[2]);

        let list_block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(C_SEPARATOR))
            .title(Span::styled(" modules ", style_muted()));
        self.list_area = list_block.inner(cols[0]);

        let items: Vec<ListItem> = self
            .modules
            .visible()
            .enumerate()
            .map(|(i, module)| {
                let (mark, mark_color) = if module.completed {
                    ("✓", C_LIVE)
                } else {
                    ("○", C_SECONDARY)
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!(" {} ", mark), Style::default().fg(mark_color)),
                        Span::styled(
                            format!("{}. {}", i + 1, module.title),
                            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(vec![
                        Span::styled(
                            format!("   {} · {} min · ", module.kind.label(), module.duration_min),
                            style_muted(),
                        ),
                        Span::styled(
                            module.difficulty.label(),
                            Style::default().fg(difficulty_color(module.difficulty)),
                        ),
                    ]),
                ])
            })
            .collect();
        let highlight = if focused {
            style_selected_focused()
        } else {
            style_selected()
        };
        self.list_state.select(Some(self.modules.selected));
        frame.render_stateful_widget(
            List::new(items).block(list_block).highlight_style(highlight),
            cols[0],
            &mut self.list_state,
        );

        let mut side = Vec::new();
        if let Some(module) = self.modules.selected_item() {
            side.push(Line::from(Span::styled(
                module.title.clone(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )));
            side.push(Line::from(Span::styled(
                module.description.clone(),
                Style::default().fg(C_SECONDARY),
            )));
            side.push(Line::from(""));
        }
        for feature in &course.features {
            side.push(Line::from(Span::styled(
                format!("◆ {}", feature.title),
                Style::default().fg(palette.accent),
            )));
            side.push(Line::from(Span::styled(
                format!("  {}", feature.description),
                style_muted(),
            )));
        }
        side.push(Line::from(""));
        side.push(Line::from(Span::styled(
            "Enter start course  r QR  s share",
            style_muted(),
        )));
        frame.render_widget(
            Paragraph::new(side)
                .block(
                    Block::default()
                        .borders(Borders::TOP | Borders::LEFT)
                        .border_style(Style::default().fg(C_SEPARATOR)),
                )
                .wrap(Wrap { trim: true }),
            cols[1],
        );
    }
}

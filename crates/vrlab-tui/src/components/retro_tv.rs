//! RetroTv window — CRT screen, channel display and a clickable remote.
//!
//! All broadcast state lives in the shared `TvDriver`; this component only
//! turns keys and clicks into `TvCommand`s and animates the static.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use vrlab_core::broadcast::{Direction, Screen};
use vrlab_core::modal::DismissReason;

use crate::{
    action::{Action, TvCommand, Window},
    app_state::AppState,
    component::Component,
    theme::{
        style_muted, C_LIVE, C_MUTED, C_PRIMARY, C_SCREEN_OFF, C_SECONDARY, C_TAG, C_TOAST_ERROR,
    },
    widgets::{
        pane_chrome::{close_button_area, draw_window, window_chrome, Badge},
        static_noise::StaticNoise,
    },
};

pub struct RetroTv {
    noise_frame: u64,
    buttons: Vec<(Rect, TvCommand)>,
}

impl RetroTv {
    pub fn new() -> Self {
        Self {
            noise_frame: 0,
            buttons: Vec::new(),
        }
    }
}

impl Default for RetroTv {
    fn default() -> Self {
        Self::new()
    }
}

fn tv(command: TvCommand) -> Vec<Action> {
    vec![Action::Tv(command)]
}

impl Component for RetroTv {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Char('p') | KeyCode::Enter => tv(TvCommand::TogglePower),
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('k') => {
                tv(TvCommand::Channel(Direction::Next))
            }
            KeyCode::Down | KeyCode::Char('-') | KeyCode::Char('j') => {
                tv(TvCommand::Channel(Direction::Prev))
            }
            KeyCode::Char(c @ '1'..='9') => {
                let n = c as usize - '1' as usize;
                tv(TvCommand::Tune(n))
            }
            KeyCode::Char('o') => tv(TvCommand::OpenVideo),
            KeyCode::Esc => vec![Action::CloseWindow(Window::Television, DismissReason::Escape)],
            KeyCode::Char('x') => vec![Action::CloseWindow(
                Window::Television,
                DismissReason::CloseButton,
            )],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        let (col, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::ScrollUp => tv(TvCommand::Channel(Direction::Next)),
            MouseEventKind::ScrollDown => tv(TvCommand::Channel(Direction::Prev)),
            MouseEventKind::Down(MouseButton::Left) => {
                let close = close_button_area(area);
                if row == close.y && col >= close.x && col < close.x + close.width {
                    return vec![Action::CloseWindow(
                        Window::Television,
                        DismissReason::CloseButton,
                    )];
                }
                self.buttons
                    .iter()
                    .find(|(r, _)| row == r.y && col >= r.x && col < r.x + r.width)
                    .map(|(_, command)| tv(*command))
                    .unwrap_or_default()
            }
            _ => vec![],
        }
    }

    fn tick(&mut self, state: &AppState) -> Vec<Action> {
        if state.tv.machine().screen() == Screen::Noise {
            self.noise_frame = self.noise_frame.wrapping_add(1);
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = state.palette();
        let machine = state.tv.machine();
        let badge = if machine.is_on() {
            Badge {
                text: "● ON",
                color: C_LIVE,
            }
        } else {
            Badge {
                text: "○ OFF",
                color: C_MUTED,
            }
        };
        let block = window_chrome("YCCC TV", None, focused, true, Some(badge), palette);
        let inner = draw_window(frame, area, block);
        if inner.height < 6 || inner.width < 20 {
            return;
        }

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        // Screen bezel.
        let bezel = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(palette.border));
        let screen = bezel.inner(chunks[0]);
        frame.render_widget(bezel, chunks[0]);
        draw_screen(frame, screen, state, self.noise_frame);

        // Front panel: channel readout and power LED.
        let label = machine.channel_label();
        let title = state
            .current_channel()
            .map(|c| c.title.clone())
            .unwrap_or_default();
        let led = if machine.is_on() {
            Span::styled("● PWR", Style::default().fg(C_LIVE))
        } else {
            Span::styled("● PWR", Style::default().fg(C_TOAST_ERROR))
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" CH ", style_muted()),
                Span::styled(
                    format!("{:<3}", label),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {} ", title), Style::default().fg(C_SECONDARY)),
            ])),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(Line::from(led)).alignment(Alignment::Right),
            chunks[1],
        );

        // Remote.
        self.buttons.clear();
        let mut buttons = vec![
            (" ⏻ ".to_string(), TvCommand::TogglePower),
            (" ▲ ".to_string(), TvCommand::Channel(Direction::Next)),
            (" ▼ ".to_string(), TvCommand::Channel(Direction::Prev)),
        ];
        for n in 0..machine.channels().min(9) {
            buttons.push((format!(" {} ", n + 1), TvCommand::Tune(n)));
        }
        buttons.push((" ▶ watch ".to_string(), TvCommand::OpenVideo));

        let row = chunks[2];
        let mut x = row.x + 1;
        let mut spans = vec![Span::raw(" ")];
        let button_style = Style::default()
            .fg(palette.title_fg)
            .bg(palette.title_bar_inactive);
        for (label, command) in buttons {
            let w = label.chars().count() as u16;
            if x + w > row.x + row.width {
                break;
            }
            self.buttons.push((Rect::new(x, row.y, w, 1), command));
            spans.push(Span::styled(label, button_style));
            spans.push(Span::raw(" "));
            x += w + 1;
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), row);
    }
}

fn draw_screen(frame: &mut Frame, area: Rect, state: &AppState, noise_frame: u64) {
    match state.tv.machine().screen() {
        Screen::Off => {
            let mut lines = vec![Line::from(""); (area.height / 2) as usize];
            lines.push(Line::from(Span::styled("·", Style::default().fg(C_MUTED))));
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .style(Style::default().bg(C_SCREEN_OFF)),
                area,
            );
        }
        Screen::Noise => frame.render_widget(StaticNoise { frame: noise_frame }, area),
        Screen::Channel(_) => {
            let Some(channel) = state.current_channel() else {
                return;
            };
            let pad = area.height.saturating_sub(4) / 2;
            let mut lines = vec![Line::from(""); pad as usize];
            lines.push(Line::from(Span::styled(
                "▶ NOW PLAYING",
                Style::default().fg(C_LIVE).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                channel.title.clone(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                channel.watch_url(),
                Style::default().fg(C_TAG),
            )));
            lines.push(Line::from(Span::styled(
                "press o to watch in your browser",
                style_muted(),
            )));
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .style(Style::default().bg(C_SCREEN_OFF)),
                area,
            );
        }
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
    fn test_remote_keys_map_to_commands() {
        let state = AppState::for_tests();
        let mut tv_window = RetroTv::new();
        assert!(matches!(
            tv_window.handle_key(key(KeyCode::Char('p')), &state)[..],
            [Action::Tv(TvCommand::TogglePower)]
        ));
        assert!(matches!(
            tv_window.handle_key(key(KeyCode::Up), &state)[..],
            [Action::Tv(TvCommand::Channel(Direction::Next))]
        ));
        assert!(matches!(
            tv_window.handle_key(key(KeyCode::Char('3')), &state)[..],
            [Action::Tv(TvCommand::Tune(2))]
        ));
        assert!(matches!(
            tv_window.handle_key(key(KeyCode::Char('x')), &state)[..],
            [Action::CloseWindow(Window::Television, DismissReason::CloseButton)]
        ));
    }

    #[test]
    fn test_noise_only_animates_during_static() {
        let state = AppState::for_tests();
        let mut tv_window = RetroTv::new();
        tv_window.tick(&state);
        assert_eq!(tv_window.noise_frame, 0);
    }
}

//! Keys bar — bottom line with the input mode and context keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::ComponentId;
use crate::theme::{Palette, C_MODE_FILTER, C_MODE_NORMAL, C_MUTED};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Filter,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "SEARCH",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Filter => C_MODE_FILTER,
        }
    }
}

fn context_keys(focused: ComponentId) -> &'static str {
    match focused {
        ComponentId::Desktop => {
            " ←→↑↓ icons  Enter open  s start  v TV  p projects  Tab windows  t theme  ? help  q quit"
        }
        ComponentId::Launcher => {
            " ↑↓ select  Enter open  ←→ category  1/2 tabs  / search  x close  Tab windows  ? help"
        }
        ComponentId::Television => {
            " p power  ↑↓ channel  1-9 tune  o watch  x close  Tab windows  ? help"
        }
        ComponentId::Gallery => {
            " ↑↓ select  Enter open  ←→ category  r QR  s share  y copy  / search  Esc back  ? help"
        }
        ComponentId::Course => {
            " ↑↓ modules  Enter start course  r QR  s share  y copy  Esc back  ? help"
        }
        ComponentId::QrModal => " y copy link  s share  o open  Esc close",
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    focused: ComponentId,
    show_help: bool,
    palette: &Palette,
) {
    let mut spans = vec![Span::styled(
        format!(" {} ", mode.label()),
        Style::default()
            .fg(mode.color())
            .add_modifier(Modifier::BOLD),
    )];

    let keys = match mode {
        InputMode::Normal if show_help => " any key close",
        InputMode::Normal => context_keys(focused),
        InputMode::Filter => " type to search  ↑↓ move  Enter keep  Esc clear+close",
    };
    spans.push(Span::styled(keys, Style::default().fg(C_MUTED)));

    let line = Line::from(spans);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(palette.taskbar)),
        area,
    );
}

//! QrModal — centered overlay with a scannable code for a link.
//!
//! Dismissal is reported with its reason so the App can log how the modal
//! was closed (backdrop click, close button, Escape).

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::warn;

use vrlab_core::modal::DismissReason;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    qr::generate_qr_code_lines,
    theme::{style_muted, C_TAG, C_TOAST_ERROR},
    widgets::pane_chrome::{close_button_area, draw_window, window_chrome},
};

pub struct QrModal {
    /// Rendered lines for the last payload, or the encoder's error.
    cache: Option<(String, Result<Vec<String>, String>)>,
    popup: Rect,
}

impl QrModal {
    pub fn new() -> Self {
        Self {
            cache: None,
            popup: Rect::default(),
        }
    }

    fn lines(&mut self, state: &AppState) -> Option<&Result<Vec<String>, String>> {
        let target = state.qr.subject()?;
        let url = target.url();
        let stale = !matches!(&self.cache, Some((cached, _)) if cached == url);
        if stale {
            let rendered = generate_qr_code_lines(&target.request(&state.qr_config)).map_err(|e| {
                warn!("qr encode failed for {}: {}", url, e);
                e.to_string()
            });
            self.cache = Some((url.to_string(), rendered));
        }
        self.cache.as_ref().map(|(_, lines)| lines)
    }
}

impl Default for QrModal {
    fn default() -> Self {
        Self::new()
    }
}

fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

impl Component for QrModal {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let Some(target) = state.qr.subject() else {
            return vec![];
        };
        match key.code {
            KeyCode::Esc => vec![Action::CloseQr(DismissReason::Escape)],
            KeyCode::Char('x') => vec![Action::CloseQr(DismissReason::CloseButton)],
            KeyCode::Char('y') => vec![Action::CopyLink(target.url().to_string())],
            KeyCode::Char('s') => vec![Action::Share(target.share.clone())],
            KeyCode::Char('o') | KeyCode::Enter => vec![Action::OpenUrl(target.url().to_string())],
            // Modal: swallow everything else.
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if !state.qr.is_open() {
            return vec![];
        }
        let MouseEventKind::Down(MouseButton::Left) = event.kind else {
            return vec![];
        };
        let (col, row) = (event.column, event.row);
        let p = self.popup;
        let close = close_button_area(p);
        if row == close.y && col >= close.x && col < close.x + close.width {
            return vec![Action::CloseQr(DismissReason::CloseButton)];
        }
        let inside = col >= p.x && col < p.x + p.width && row >= p.y && row < p.y + p.height;
        if inside {
            vec![]
        } else {
            vec![Action::CloseQr(DismissReason::Backdrop)]
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(target) = state.qr.subject().cloned() else {
            self.popup = Rect::default();
            return;
        };
        let palette = state.palette();
        let body: Vec<Line> = match self.lines(state) {
            Some(Ok(lines)) => lines
                .iter()
                .map(|l| {
                    Line::from(Span::styled(
                        l.clone(),
                        Style::default().fg(Color::Black).bg(Color::White),
                    ))
                })
                .collect(),
            Some(Err(e)) => vec![Line::from(Span::styled(
                format!("QR unavailable: {}", e),
                Style::default().fg(C_TOAST_ERROR),
            ))],
            None => return,
        };

        let code_w = body.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let url_w = target.url().chars().count() as u16;
        let width = code_w.max(url_w).max(36) + 4;
        let height = body.len() as u16 + 6;
        self.popup = centered(width, height, area);

        let block = window_chrome(&target.title, None, true, true, None, palette);
        let inner = draw_window(frame, self.popup, block);

        let mut lines = vec![Line::from("")];
        lines.extend(body);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            target.url().to_string(),
            Style::default().fg(C_TAG).add_modifier(Modifier::UNDERLINED),
        )));
        let hint = if state.native_share {
            "scan to open · y copy · s share · Esc close"
        } else {
            "scan to open · y copy link · Esc close"
        };
        lines.push(Line::from(Span::styled(hint, style_muted())));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }
}

//! Color palette and style constants for the VR Lab TUI.
//!
//! Neutral text colors are shared; the desktop chrome (wallpaper, taskbar,
//! title bars, Start button) comes from a per-theme [`Palette`].

use ratatui::style::{Color, Modifier, Style};
use vrlab_core::config::ThemeKind;

// ── Shared palette ────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 24);
pub const C_MUTED: Color = Color::Rgb(88, 88, 104);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(140, 140, 160);
pub const C_PRIMARY: Color = Color::Rgb(225, 225, 235);
pub const C_SELECTION_BG: Color = Color::Rgb(34, 44, 72);
pub const C_NUMBER_HINT: Color = Color::Rgb(100, 100, 125);
pub const C_FILTER_BG: Color = Color::Rgb(20, 20, 32);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);
pub const C_TAG: Color = Color::Rgb(80, 140, 200);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_STARS: Color = Color::Rgb(255, 210, 50);
pub const C_LIVE: Color = Color::Rgb(80, 200, 120);
pub const C_MODE_NORMAL: Color = Color::Rgb(140, 140, 160);
pub const C_MODE_FILTER: Color = Color::Rgb(255, 200, 80);
pub const C_SCREEN_OFF: Color = Color::Rgb(6, 6, 8);

// Category badges.
pub const C_CAT_VR: Color = Color::Rgb(120, 100, 220);
pub const C_CAT_AR: Color = Color::Rgb(80, 170, 220);
pub const C_CAT_XR: Color = Color::Rgb(220, 120, 200);
pub const C_CAT_WEB: Color = Color::Rgb(90, 200, 150);
pub const C_CAT_PRO: Color = Color::Rgb(120, 100, 220);
pub const C_CAT_BEGINNER: Color = Color::Rgb(90, 200, 120);
pub const C_CAT_EXPERIMENTAL: Color = Color::Rgb(255, 150, 70);
pub const C_CAT_FREE: Color = Color::Rgb(80, 160, 240);

/// Desktop chrome for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub wallpaper: Color,
    pub wallpaper_accent: Color,
    pub taskbar: Color,
    pub taskbar_fg: Color,
    pub start_bg: Color,
    pub start_fg: Color,
    pub title_bar: Color,
    pub title_bar_inactive: Color,
    pub title_fg: Color,
    pub window_bg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub accent: Color,
}

pub const XP: Palette = Palette {
    wallpaper: Color::Rgb(58, 110, 165),
    wallpaper_accent: Color::Rgb(92, 160, 80),
    taskbar: Color::Rgb(36, 94, 220),
    taskbar_fg: Color::Rgb(255, 255, 255),
    start_bg: Color::Rgb(60, 150, 60),
    start_fg: Color::Rgb(255, 255, 255),
    title_bar: Color::Rgb(0, 84, 227),
    title_bar_inactive: Color::Rgb(122, 150, 223),
    title_fg: Color::Rgb(255, 255, 255),
    window_bg: Color::Rgb(24, 32, 54),
    border: Color::Rgb(122, 150, 223),
    border_focused: Color::Rgb(0, 84, 227),
    accent: Color::Rgb(255, 160, 40),
};

pub const VISTA: Palette = Palette {
    wallpaper: Color::Rgb(14, 38, 64),
    wallpaper_accent: Color::Rgb(40, 120, 160),
    taskbar: Color::Rgb(20, 24, 32),
    taskbar_fg: Color::Rgb(210, 225, 240),
    start_bg: Color::Rgb(30, 110, 180),
    start_fg: Color::Rgb(255, 255, 255),
    title_bar: Color::Rgb(40, 70, 110),
    title_bar_inactive: Color::Rgb(50, 56, 68),
    title_fg: Color::Rgb(235, 240, 250),
    window_bg: Color::Rgb(22, 26, 36),
    border: Color::Rgb(56, 64, 84),
    border_focused: Color::Rgb(90, 170, 230),
    accent: Color::Rgb(90, 170, 230),
};

pub fn palette(kind: ThemeKind) -> &'static Palette {
    match kind {
        ThemeKind::Xp => &XP,
        ThemeKind::Vista => &VISTA,
    }
}

/// Badge color for a category label. Unknown labels get the tag color.
pub fn category_color(label: &str) -> Color {
    match label {
        "VR" => C_CAT_VR,
        "AR" => C_CAT_AR,
        "XR" => C_CAT_XR,
        "Web" => C_CAT_WEB,
        "Professional" => C_CAT_PRO,
        "Beginner" => C_CAT_BEGINNER,
        "Experimental" => C_CAT_EXPERIMENTAL,
        "Free" => C_CAT_FREE,
        _ => C_TAG,
    }
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_selected() -> Style {
    Style::default().bg(C_SELECTION_BG).fg(C_PRIMARY)
}

pub fn style_selected_focused() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_border(p: &Palette, focused: bool) -> Style {
    if focused {
        Style::default().fg(p.border_focused)
    } else {
        Style::default().fg(p.border)
    }
}

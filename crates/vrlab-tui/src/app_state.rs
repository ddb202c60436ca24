//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this but never mutate it. The App event loop is the only
//! writer.

use vrlab_core::catalog::{Catalog, CatalogItem, Channel, Content};
use vrlab_core::config::{QrConfig, ThemeKind};
use vrlab_core::modal::Modal;

use crate::action::{CatalogKind, ItemRef, LauncherTab, QrTarget};
use crate::router::Page;
use crate::theme::{self, Palette};
use crate::tv_driver::TvDriver;
use crate::widgets::status_bar::InputMode;

pub struct AppState {
    pub content: Content,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub theme: ThemeKind,
    pub page: Page,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub show_keys_bar: bool,

    // ── Windows and modals ──────────────────────────────────────────────────
    pub launcher_window: Modal<LauncherTab>,
    pub tv_window: Modal<()>,
    pub qr: Modal<QrTarget>,
    pub qr_config: QrConfig,

    // ── Television ──────────────────────────────────────────────────────────
    pub tv: TvDriver,

    /// A native share handler is configured.
    pub native_share: bool,
}

impl AppState {
    pub fn palette(&self) -> &'static Palette {
        theme::palette(self.theme)
    }

    pub fn catalog(&self, kind: CatalogKind) -> &Catalog {
        match kind {
            CatalogKind::Launcher => &self.content.launcher,
            CatalogKind::ArtStudio => &self.content.art_studio,
            CatalogKind::Projects => &self.content.projects,
        }
    }

    pub fn resolve(&self, item: &ItemRef) -> Option<&CatalogItem> {
        self.catalog(item.catalog).get(&item.id)
    }

    /// The channel on screen, if the set is playing.
    pub fn current_channel(&self) -> Option<&Channel> {
        match self.tv.machine().screen() {
            vrlab_core::broadcast::Screen::Channel(i) => self.content.playlist.get(i),
            _ => None,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over the embedded content with the TV timers going nowhere.
    pub fn for_tests() -> Self {
        use vrlab_core::broadcast::{Broadcast, Timings};

        let content = Content::embedded().unwrap();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let machine = Broadcast::new(content.playlist.len(), Timings::default());
        Self {
            content,
            theme: ThemeKind::default(),
            page: Page::Desktop,
            input_mode: InputMode::Normal,
            show_help: false,
            show_keys_bar: true,
            launcher_window: Modal::new(),
            tv_window: Modal::new(),
            qr: Modal::new(),
            qr_config: QrConfig::default(),
            tv: TvDriver::new(machine, tx),
            native_share: false,
        }
    }
}

//! Action enum — all user-initiated intents and internal events.

use vrlab_core::broadcast::Direction;
use vrlab_core::catalog::{Destination, ItemId};
use vrlab_core::modal::DismissReason;
use vrlab_core::qr::QrRequest;
use vrlab_core::share::SharePayload;

use crate::router::Page;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Desktop,
    Launcher,
    Television,
    Gallery,
    Course,
    QrModal,
}

/// Desktop windows. Each is backed by a modal in `AppState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Launcher,
    Television,
}

impl Window {
    pub fn component(self) -> ComponentId {
        match self {
            Self::Launcher => ComponentId::Launcher,
            Self::Television => ComponentId::Television,
        }
    }
}

/// Which tab the launcher window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LauncherTab {
    #[default]
    Tools,
    ArtStudio,
}

/// Which catalog an item reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Launcher,
    ArtStudio,
    Projects,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub catalog: CatalogKind,
    pub id: ItemId,
}

/// What the QR modal is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrTarget {
    pub title: String,
    pub share: SharePayload,
}

impl QrTarget {
    pub fn url(&self) -> &str {
        &self.share.url
    }

    pub fn request(&self, config: &vrlab_core::config::QrConfig) -> QrRequest {
        QrRequest::new(self.url(), config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvCommand {
    TogglePower,
    Channel(Direction),
    Tune(usize),
    OpenVideo,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    Navigate(Page),
    Back,
    OpenDestination(Destination),
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Windows ──────────────────────────────────────────────────────────────
    OpenLauncher(LauncherTab),
    ToggleLauncher,
    OpenTelevision,
    CloseWindow(Window, DismissReason),

    // ── Items ────────────────────────────────────────────────────────────────
    Launch(ItemRef),
    OpenUrl(String),
    ShowQr(QrTarget),
    CloseQr(DismissReason),
    Share(SharePayload),
    CopyLink(String),
    Unavailable(String),

    // ── Television ───────────────────────────────────────────────────────────
    Tv(TvCommand),
    TvTimeout(u64),

    // ── Filter/search ────────────────────────────────────────────────────────
    OpenFilter,
    CloseFilter,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleTheme,
    ToggleHelp,
    ToggleKeys,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}

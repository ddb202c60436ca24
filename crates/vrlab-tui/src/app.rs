//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - Terminal events arrive over a `tokio::mpsc` channel fed by a blocking reader.
//! - TV timer tokens arrive over a second channel fed by `TvDriver`.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Clipboard, share and URL opening go through `Ports`.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use vrlab_core::broadcast::Broadcast;
use vrlab_core::catalog::{Content, Destination};
use vrlab_core::config::Config;
use vrlab_core::launch::{LaunchHandler, LaunchOutcome};
use vrlab_core::modal::{DismissReason, Modal};
use vrlab_core::share::{copy_link, share_or_copy, NativeShare, ShareOutcome};

use crate::{
    action::{Action, ComponentId, LauncherTab, TvCommand, Window},
    app_state::AppState,
    component::Component,
    components::{
        course_page::CoursePage, desktop::Desktop, help_overlay::HelpOverlay,
        launcher::Launcher, project_gallery::ProjectGallery, qr_modal::QrModal,
        retro_tv::RetroTv,
    },
    external::Ports,
    focus::FocusRing,
    router::{Page, Router},
    tv_driver::TvDriver,
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

/// Screen areas from the last draw, for mouse hit-testing.
#[derive(Default)]
struct WindowAreas {
    body: Rect,
    launcher: Rect,
    television: Rect,
}

pub struct App {
    state: AppState,
    router: Router,
    /// Open desktop windows; the focused one is in front.
    windows: FocusRing,

    desktop: Desktop,
    launcher: Launcher,
    television: RetroTv,
    gallery: ProjectGallery,
    course: CoursePage,
    qr_modal: QrModal,
    help_overlay: HelpOverlay,

    toast: ToastManager,
    ports: Ports,
    areas: WindowAreas,
    should_quit: bool,
}

impl App {
    pub fn new(
        content: Content,
        config: &Config,
        ports: Ports,
        tv_tx: mpsc::UnboundedSender<u64>,
    ) -> Self {
        let start = Page::from(config.ui.start_page);
        let machine = Broadcast::new(content.playlist.len(), config.broadcast.timings());

        let launcher = Launcher::new(&content);
        let gallery = ProjectGallery::new(&content);
        let course = CoursePage::new(&content.course);

        let state = AppState {
            content,
            theme: config.ui.theme,
            page: start,
            input_mode: InputMode::Normal,
            show_help: false,
            show_keys_bar: config.ui.show_keys_bar,
            launcher_window: Modal::new(),
            tv_window: Modal::new(),
            qr: Modal::new(),
            qr_config: config.qr.clone(),
            tv: TvDriver::new(machine, tv_tx),
            native_share: ports.share.is_some(),
        };

        Self {
            state,
            router: Router::new(start),
            windows: FocusRing::default(),
            desktop: Desktop::new(),
            launcher,
            television: RetroTv::new(),
            gallery,
            course,
            qr_modal: QrModal::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            ports,
            areas: WindowAreas::default(),
            should_quit: false,
        }
    }

    pub async fn run(mut self, mut tv_rx: mpsc::UnboundedReceiver<u64>) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<Event>(1024);

        // ── Background task: keyboard/mouse events ────────────────────────────
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(ev).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // UI tick drives the static animation and the taskbar clock.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut toast_tick = tokio::time::interval(Duration::from_millis(250));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("vrlab started on {:?}", self.router.current());

        // ── Main loop ─────────────────────────────────────────────────────────
        loop {
            terminal.draw(|f| self.draw(f))?;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(ev) = rx.recv() => {
                    self.handle_event(ev);
                    // Drain whatever queued up behind it before redrawing.
                    while let Ok(next) = rx.try_recv() {
                        self.handle_event(next);
                    }
                }

                Some(token) = tv_rx.recv() => {
                    self.dispatch(Action::TvTimeout(token));
                }

                _ = ui_tick.tick() => {
                    let tick_actions: Vec<Action> = {
                        let s = &self.state;
                        let mut all = Vec::new();
                        all.extend(self.desktop.tick(s));
                        all.extend(self.launcher.tick(s));
                        all.extend(self.television.tick(s));
                        all.extend(self.gallery.tick(s));
                        all.extend(self.course.tick(s));
                        all
                    };
                    for action in tick_actions {
                        self.dispatch(action);
                    }
                }

                _ = toast_tick.tick() => {
                    self.toast.tick();
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("vrlab exiting");

        Ok(())
    }

    fn handle_event(&mut self, ev: Event) {
        match ev {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return;
                }
                for a in self.handle_key(key) {
                    self.dispatch(a);
                }
                self.sync_input_mode();
            }
            Event::Mouse(mouse) => {
                for a in self.handle_mouse(mouse) {
                    self.dispatch(a);
                }
            }
            Event::Resize(w, h) => self.dispatch(Action::Resize(w, h)),
            _ => {}
        }
    }

    // ── Focus ─────────────────────────────────────────────────────────────────

    /// The component that receives keys right now.
    fn focused(&self) -> ComponentId {
        if self.state.qr.is_open() {
            return ComponentId::QrModal;
        }
        match self.router.current() {
            Page::Desktop => self.windows.current().unwrap_or(ComponentId::Desktop),
            Page::Projects => ComponentId::Gallery,
            Page::Course => ComponentId::Course,
        }
    }

    fn sync_input_mode(&mut self) {
        let filtering = match self.focused() {
            ComponentId::Launcher => self.launcher.is_filtering(),
            ComponentId::Gallery => self.gallery.is_filtering(),
            _ => false,
        };
        self.state.input_mode = if filtering {
            InputMode::Filter
        } else {
            InputMode::Normal
        };
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let normal = self.state.input_mode == InputMode::Normal;

        // Global keys — always active regardless of focus
        match key.code {
            KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE && normal => {
                return vec![Action::Quit];
            }
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                return vec![Action::Quit];
            }
            KeyCode::Char('?') if normal => return vec![Action::ToggleHelp],
            _ => {}
        }

        // Help overlay captures all keys when visible
        if self.state.show_help {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if !actions.is_empty() {
                return actions;
            }
            // Any other key closes the overlay
            return vec![Action::ToggleHelp];
        }

        if self.state.qr.is_open() {
            return self.qr_modal.handle_key(key, &self.state);
        }

        if normal {
            match key.code {
                KeyCode::Char('t') => return vec![Action::ToggleTheme],
                KeyCode::Char('K') => return vec![Action::ToggleKeys],
                KeyCode::Tab if self.router.current() == Page::Desktop => {
                    return vec![Action::FocusNext]
                }
                KeyCode::BackTab if self.router.current() == Page::Desktop => {
                    return vec![Action::FocusPrev]
                }
                _ => {}
            }
        }

        let focused = self.focused();
        let state = &self.state;
        match focused {
            ComponentId::Desktop => self.desktop.handle_key(key, state),
            ComponentId::Launcher => self.launcher.handle_key(key, state),
            ComponentId::Television => self.television.handle_key(key, state),
            ComponentId::Gallery => self.gallery.handle_key(key, state),
            ComponentId::Course => self.course.handle_key(key, state),
            ComponentId::QrModal => self.qr_modal.handle_key(key, state),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0 && col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
        }

        if self.state.show_help {
            return vec![];
        }
        let body = self.areas.body;
        if self.state.qr.is_open() {
            return self.qr_modal.handle_mouse(event, body, &self.state);
        }

        let (col, row) = (event.column, event.row);
        match self.router.current() {
            Page::Projects => self.gallery.handle_mouse(event, body, &self.state),
            Page::Course => self.course.handle_mouse(event, body, &self.state),
            Page::Desktop => {
                // Front-most window first.
                for id in self.windows.paint_order().into_iter().rev() {
                    let area = match id {
                        ComponentId::Launcher => self.areas.launcher,
                        ComponentId::Television => self.areas.television,
                        _ => continue,
                    };
                    if hit(area, col, row) {
                        if !self.windows.is_focused(id) {
                            self.windows.raise(id);
                        }
                        let state = &self.state;
                        return match id {
                            ComponentId::Launcher => self.launcher.handle_mouse(event, area, state),
                            _ => self.television.handle_mouse(event, area, state),
                        };
                    }
                }
                self.desktop.handle_mouse(event, body, &self.state)
            }
        }
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Broadcast action to all components first
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.desktop.on_action(&action, s));
            out.extend(self.launcher.on_action(&action, s));
            out.extend(self.television.on_action(&action, s));
            out.extend(self.gallery.on_action(&action, s));
            out.extend(self.course.on_action(&action, s));
            out.extend(self.qr_modal.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        // Depth-limited to 1 level
        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match &action {
            Action::TvTimeout(_) | Action::Resize(..) => {}
            _ => debug!("apply_action: {:?}", action),
        }
        match action {
            // ── Navigation ────────────────────────────────────────────────────
            Action::Navigate(page) => {
                if self.router.navigate(page) {
                    info!("navigate -> {}", page.title());
                }
                self.sync_page();
            }
            Action::Back => {
                self.router.back();
                self.sync_page();
            }
            Action::OpenDestination(dest) => {
                let next = match dest {
                    Destination::Launcher => Action::OpenLauncher(LauncherTab::Tools),
                    Destination::ArtStudio => Action::OpenLauncher(LauncherTab::ArtStudio),
                    Destination::Television => Action::OpenTelevision,
                    Destination::Projects => Action::Navigate(Page::Projects),
                    Destination::Course => Action::Navigate(Page::Course),
                };
                self.dispatch(next);
            }
            Action::FocusNext => {
                self.windows.next();
            }
            Action::FocusPrev => {
                self.windows.prev();
            }
            Action::FocusPane(id) => {
                if self.windows.items().contains(&id) {
                    self.windows.raise(id);
                }
            }

            // ── Windows ───────────────────────────────────────────────────────
            Action::OpenLauncher(tab) => {
                self.show_desktop();
                self.state.launcher_window.open(tab);
                self.windows.raise(ComponentId::Launcher);
            }
            Action::ToggleLauncher => {
                self.show_desktop();
                let buried = self.state.launcher_window.is_open()
                    && !self.windows.is_focused(ComponentId::Launcher);
                if buried {
                    self.windows.raise(ComponentId::Launcher);
                } else if self.state.launcher_window.toggle(self.launcher.tab()) {
                    self.windows.raise(ComponentId::Launcher);
                } else {
                    self.windows.remove(ComponentId::Launcher);
                }
            }
            Action::OpenTelevision => {
                self.show_desktop();
                self.state.tv_window.open(());
                self.windows.raise(ComponentId::Television);
            }
            Action::CloseWindow(window, reason) => self.close_window(window, reason),

            // ── Items ─────────────────────────────────────────────────────────
            Action::Launch(item_ref) => {
                let Some(item) = self.state.resolve(&item_ref).cloned() else {
                    warn!("launch: unknown item {}", item_ref.id);
                    return;
                };
                match self.ports.launcher.on_launch(&item) {
                    Ok(LaunchOutcome::Opened(url)) => {
                        info!("launched {} -> {}", item.id, url);
                        self.toast.info(format!("opening {}", item.title));
                    }
                    Ok(LaunchOutcome::Unavailable) => {
                        self.toast
                            .warning(format!("{} is not available online", item.title));
                    }
                    Err(e) => {
                        error!("launch {}: {}", item.id, e);
                        self.toast.error(format!("could not open {}", item.title));
                    }
                }
            }
            Action::OpenUrl(url) => match self.ports.launcher.open_url(&url) {
                Ok(_) => {
                    info!("opened {}", url);
                    self.toast.info("opening in browser");
                }
                Err(e) => {
                    error!("{}", e);
                    self.toast.error("could not open browser");
                }
            },
            Action::ShowQr(target) => {
                info!("qr for {}", target.url());
                self.state.qr.open(target);
            }
            Action::CloseQr(reason) => {
                self.state.qr.close(reason);
            }
            Action::Share(payload) => {
                let native = self
                    .ports
                    .share
                    .as_deref_mut()
                    .map(|s| s as &mut dyn NativeShare);
                match share_or_copy(native, self.ports.clipboard.as_mut(), &payload) {
                    ShareOutcome::Shared => self.toast.success(format!("shared {}", payload.title)),
                    ShareOutcome::Copied => self.toast.success("link copied to clipboard"),
                    ShareOutcome::Failed(e) => self.toast.error(e.to_string()),
                }
            }
            Action::CopyLink(url) => match copy_link(self.ports.clipboard.as_mut(), &url) {
                Ok(()) => self.toast.success("link copied to clipboard"),
                Err(e) => self.toast.error(e.to_string()),
            },
            Action::Unavailable(title) => {
                self.toast.warning(format!("{} has no link yet", title));
            }

            // ── Television ────────────────────────────────────────────────────
            Action::Tv(command) => match command {
                TvCommand::TogglePower => {
                    self.state.tv.apply(|m| m.toggle_power());
                }
                TvCommand::Channel(direction) => {
                    self.state.tv.apply(|m| m.channel(direction));
                }
                TvCommand::Tune(n) => {
                    self.state.tv.apply(|m| m.tune(n));
                }
                TvCommand::OpenVideo => match self.state.current_channel() {
                    Some(channel) => {
                        let url = channel.watch_url();
                        self.apply_action(Action::OpenUrl(url));
                    }
                    None => self.toast.info("nothing playing"),
                },
            },
            Action::TvTimeout(token) => {
                self.state.tv.fire(token);
            }

            // ── Filter ────────────────────────────────────────────────────────
            Action::OpenFilter => self.state.input_mode = InputMode::Filter,
            Action::CloseFilter => self.state.input_mode = InputMode::Normal,

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleTheme => {
                self.state.theme = self.state.theme.toggled();
                info!("theme -> {}", self.state.theme.label());
            }
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
            Action::ToggleKeys => self.state.show_keys_bar = !self.state.show_keys_bar,

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
            Action::Resize(w, h) => debug!("resize {}x{}", w, h),
        }
    }

    fn sync_page(&mut self) {
        self.state.page = self.router.current();
        self.state.input_mode = InputMode::Normal;
    }

    fn show_desktop(&mut self) {
        if self.router.current() != Page::Desktop {
            self.router.navigate(Page::Desktop);
            self.sync_page();
        }
    }

    fn close_window(&mut self, window: Window, reason: DismissReason) {
        match window {
            Window::Launcher => {
                self.state.launcher_window.close(reason);
            }
            Window::Television => {
                self.state.tv_window.close(reason);
                // A closed set is a set switched off.
                self.state.tv.apply(|m| m.power_off());
            }
        }
        self.windows.remove(window.component());
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        let status_h = if self.state.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(status_h)])
            .split(area);
        let body = outer[0];
        self.areas.body = body;

        let focused = self.focused();
        let qr_open = self.state.qr.is_open();
        match self.router.current() {
            Page::Desktop => {
                self.desktop
                    .draw(frame, body, focused == ComponentId::Desktop, &self.state);
                let workspace = Desktop::workspace(body);
                self.areas.launcher = launcher_rect(workspace);
                self.areas.television = television_rect(workspace);
                for id in self.windows.paint_order() {
                    let is_focused = !qr_open && focused == id;
                    match id {
                        ComponentId::Launcher => {
                            self.launcher
                                .draw(frame, self.areas.launcher, is_focused, &self.state)
                        }
                        ComponentId::Television => {
                            self.television
                                .draw(frame, self.areas.television, is_focused, &self.state)
                        }
                        _ => {}
                    }
                }
            }
            Page::Projects => {
                self.areas.launcher = Rect::default();
                self.areas.television = Rect::default();
                self.gallery
                    .draw(frame, body, focused == ComponentId::Gallery, &self.state);
            }
            Page::Course => {
                self.areas.launcher = Rect::default();
                self.areas.television = Rect::default();
                self.course
                    .draw(frame, body, focused == ComponentId::Course, &self.state);
            }
        }

        if self.state.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                outer[1],
                self.state.input_mode,
                focused,
                self.state.show_help,
                self.state.palette(),
            );
        }

        if qr_open {
            self.qr_modal.draw(frame, body, true, &self.state);
        }

        // ── Help overlay (on top of everything) ──────────────────────────────
        if self.state.show_help {
            self.help_overlay.draw(frame, area, false, &self.state);
        }

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}

fn launcher_rect(ws: Rect) -> Rect {
    let w = ws.width.saturating_sub(ws.width / 5).max(ws.width.min(40));
    let h = ws.height.saturating_sub(2);
    Rect::new(ws.x + (ws.width - w) / 2, ws.y + 1, w, h)
}

fn television_rect(ws: Rect) -> Rect {
    let w = ws.width.min(60);
    let h = ws.height.min(22);
    Rect::new(
        ws.x + ws.width - w,
        ws.y + (ws.height - h) / 2,
        w,
        h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use vrlab_core::broadcast::{BroadcastState, Screen};
    use vrlab_core::launch::UrlLauncher;
    use vrlab_core::share::{Clipboard, ShareError};

    use crate::action::{CatalogKind, ItemRef, QrTarget};
    use crate::external::Opener;
    use vrlab_core::catalog::ItemId;

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Recorder {
        fn taken(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    impl Clipboard for Recorder {
        fn write_text(&mut self, text: &str) -> Result<(), ShareError> {
            self.0.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn app() -> (App, Recorder, Recorder, mpsc::UnboundedReceiver<u64>) {
        let clipboard = Recorder::default();
        let opened = Recorder::default();
        let sink = opened.clone();
        let opener: Opener = Box::new(move |url: &str| {
            sink.0.borrow_mut().push(url.to_string());
            Ok(())
        });
        let ports = Ports {
            clipboard: Box::new(clipboard.clone()),
            share: None,
            launcher: UrlLauncher::new(opener),
        };
        let (tx, rx) = mpsc::unbounded_channel();
        let content = Content::embedded().unwrap();
        let app = App::new(content, &Config::default(), ports, tx);
        (app, clipboard, opened, rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) {
        for a in app.handle_key(key(code)) {
            app.dispatch(a);
        }
        app.sync_input_mode();
    }

    #[tokio::test(start_paused = true)]
    async fn test_desktop_icon_opens_launcher_in_front() {
        let (mut app, ..) = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.state.launcher_window.is_open());
        assert_eq!(app.focused(), ComponentId::Launcher);

        press(&mut app, KeyCode::Esc);
        assert!(!app.state.launcher_window.is_open());
        assert_eq!(app.focused(), ComponentId::Desktop);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_button_raises_then_closes_launcher() {
        let (mut app, ..) = app();
        app.dispatch(Action::ToggleLauncher);
        assert!(app.state.launcher_window.is_open());
        app.dispatch(Action::OpenTelevision);
        assert_eq!(app.focused(), ComponentId::Television);

        // Buried under the TV: raised, not closed.
        app.dispatch(Action::ToggleLauncher);
        assert!(app.state.launcher_window.is_open());
        assert_eq!(app.focused(), ComponentId::Launcher);

        app.dispatch(Action::ToggleLauncher);
        assert!(!app.state.launcher_window.is_open());
        assert_eq!(app.focused(), ComponentId::Television);
    }

    #[tokio::test(start_paused = true)]
    async fn test_art_studio_tool_switches_launcher_tab() {
        let (mut app, ..) = app();
        app.dispatch(Action::OpenDestination(Destination::ArtStudio));
        assert_eq!(app.launcher.tab(), LauncherTab::ArtStudio);
        assert_eq!(
            app.state.launcher_window.subject(),
            Some(&LauncherTab::ArtStudio)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_tv_window_powers_off() {
        let (mut app, _, _, mut rx) = app();
        app.dispatch(Action::OpenTelevision);
        press(&mut app, KeyCode::Char('p'));
        assert!(app.state.tv.machine().is_on());

        tokio::time::sleep(Duration::from_millis(2100)).await;
        let token = rx.recv().await.unwrap();
        app.dispatch(Action::TvTimeout(token));
        assert_eq!(app.state.tv.machine().screen(), Screen::Channel(0));

        press(&mut app, KeyCode::Char('x'));
        assert!(!app.state.tv_window.is_open());
        assert_eq!(app.state.tv.machine().state(), BroadcastState::Off);
    }

    #[tokio::test(start_paused = true)]
    async fn test_qr_modal_takes_keys_until_dismissed() {
        let (mut app, ..) = app();
        app.dispatch(Action::Navigate(Page::Projects));
        press(&mut app, KeyCode::Char('r'));
        assert!(app.state.qr.is_open());
        assert_eq!(app.focused(), ComponentId::QrModal);

        // Esc closes the modal, not the page.
        press(&mut app, KeyCode::Esc);
        assert!(!app.state.qr.is_open());
        assert_eq!(app.router.current(), Page::Projects);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.router.current(), Page::Desktop);
    }

    #[tokio::test(start_paused = true)]
    async fn test_share_without_handler_copies_link() {
        let (mut app, clipboard, ..) = app();
        let payload = app.state.content.course.share_payload();
        app.dispatch(Action::Share(payload.clone()));
        assert_eq!(clipboard.taken(), vec![payload.url]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_launch_passes_url_unmodified() {
        let (mut app, _, opened, _rx) = app();
        let id = ItemId::new("hangar-bay");
        let url = app.state.content.projects.get(&id).and_then(|i| i.url.clone());
        app.dispatch(Action::Launch(ItemRef {
            catalog: CatalogKind::Projects,
            id,
        }));
        assert_eq!(opened.taken(), url.into_iter().collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn test_launch_without_url_opens_nothing() {
        let (mut app, _, opened, _rx) = app();
        let first = app.state.content.launcher.items()[0].id.clone();
        app.dispatch(Action::Launch(ItemRef {
            catalog: CatalogKind::Launcher,
            id: first,
        }));
        assert!(opened.taken().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_backdrop_close_reason_clears_subject() {
        let (mut app, ..) = app();
        let share = app.state.content.course.share_payload();
        app.dispatch(Action::ShowQr(QrTarget {
            title: "The Hawk".into(),
            share,
        }));
        app.dispatch(Action::CloseQr(DismissReason::Backdrop));
        assert!(app.state.qr.subject().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_is_global_outside_filter() {
        let (mut app, ..) = app();
        app.dispatch(Action::Navigate(Page::Projects));
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.state.input_mode, InputMode::Filter);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.input_mode, InputMode::Normal);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}

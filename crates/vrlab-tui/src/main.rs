mod action;
mod app;
mod app_state;
mod component;
mod components;
mod external;
mod focus;
mod qr;
mod router;
mod theme;
mod tv_driver;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;

use vrlab_core::catalog::Content;
use vrlab_core::config::{Config, StartPage, ThemeKind};

#[derive(Parser)]
#[command(name = "vrlab")]
#[command(about = "Terminal showcase for the YCCC VR Lab", long_about = None)]
#[command(version)]
struct Cli {
    /// Desktop theme: xp or vista
    #[arg(long)]
    theme: Option<ThemeKind>,

    /// Page to open on start
    #[arg(long, value_parser = ["desktop", "projects", "course"])]
    page: Option<String>,

    /// Catalog file to load instead of the configured one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Hide the keys bar
    #[arg(long)]
    no_keys_bar: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = vrlab_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = vrlab_core::platform::log_path();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("vrlab log: {}", log_path.display());

    tracing::info!("vrlab starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config: {}, using defaults", e);
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.ui.theme = theme;
    }
    match cli.page.as_deref() {
        Some("desktop") => config.ui.start_page = StartPage::Desktop,
        Some("projects") => config.ui.start_page = StartPage::Projects,
        Some("course") => config.ui.start_page = StartPage::Course,
        _ => {}
    }
    if cli.no_keys_bar {
        config.ui.show_keys_bar = false;
    }
    if let Some(path) = cli.catalog {
        config.catalog.path = path;
    }

    // ── Load content ─────────────────────────────────────────────────────────
    let content = match Content::load(&config.catalog.path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                "catalog {}: {}, using built-in content",
                config.catalog.path.display(),
                e
            );
            Content::embedded()?
        }
    };
    tracing::info!(
        "catalog: {} tools, {} art tools, {} projects, {} channels",
        content.launcher.len(),
        content.art_studio.len(),
        content.projects.len(),
        content.playlist.len()
    );

    // ── TV timer channel (TvDriver → App) ────────────────────────────────────
    let (tv_tx, tv_rx) = mpsc::unbounded_channel::<u64>();

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let ports = external::Ports::system(&config.share);
    let app = app::App::new(content, &config, ports, tv_tx);
    app.run(tv_rx).await?;

    Ok(())
}

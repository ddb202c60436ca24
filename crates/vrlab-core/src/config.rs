use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::broadcast::Timings;
use super::platform;
use super::qr::QrLevel;
use crate::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub broadcast: BroadcastConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub qr: QrConfig,
}

/// Desktop look. Passed down explicitly to every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Xp,
    #[default]
    Vista,
}

impl ThemeKind {
    pub fn toggled(self) -> Self {
        match self {
            Self::Xp => Self::Vista,
            Self::Vista => Self::Xp,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Xp => "Windows XP",
            Self::Vista => "Windows Vista",
        }
    }
}

impl std::str::FromStr for ThemeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xp" => Ok(Self::Xp),
            "vista" => Ok(Self::Vista),
            other => Err(format!("unknown theme '{}', expected xp or vista", other)),
        }
    }
}

/// Which page the TUI shows first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartPage {
    #[default]
    Desktop,
    Projects,
    Course,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeKind,
    #[serde(default)]
    pub start_page: StartPage,
    #[serde(default = "default_show_keys_bar")]
    pub show_keys_bar: bool,
}

/// Timings for the retro TV. `content_end_secs = 0` disables the
/// auto-advance fallback timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastConfig {
    #[serde(default = "default_power_on_static_ms")]
    pub power_on_static_ms: u64,
    #[serde(default = "default_channel_static_ms")]
    pub channel_static_ms: u64,
    #[serde(default = "default_content_end_secs")]
    pub content_end_secs: u64,
}

/// Native share handler. When `handler` is empty there is no native share
/// and sharing falls back to the clipboard.
///
/// The handler is a URL template opened with the system opener; `{title}`,
/// `{text}` and `{url}` are replaced with percent-encoded values, e.g.
/// `mailto:?subject={title}&body={text}%20{url}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareConfig {
    #[serde(default)]
    pub handler: String,
}

/// Catalog source. When `path` exists it replaces the built-in content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrConfig {
    #[serde(default)]
    pub level: QrLevel,
    #[serde(default = "default_quiet_zone")]
    pub quiet_zone: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeKind::default(),
            start_page: StartPage::default(),
            show_keys_bar: default_show_keys_bar(),
        }
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            power_on_static_ms: default_power_on_static_ms(),
            channel_static_ms: default_channel_static_ms(),
            content_end_secs: default_content_end_secs(),
        }
    }
}

impl BroadcastConfig {
    pub fn timings(&self) -> Timings {
        Timings {
            power_on_static: Duration::from_millis(self.power_on_static_ms),
            channel_static: Duration::from_millis(self.channel_static_ms),
            content_end: (self.content_end_secs > 0)
                .then(|| Duration::from_secs(self.content_end_secs)),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            level: QrLevel::default(),
            quiet_zone: default_quiet_zone(),
        }
    }
}

fn default_show_keys_bar() -> bool {
    true
}

fn default_power_on_static_ms() -> u64 {
    2000
}

fn default_channel_static_ms() -> u64 {
    1000
}

fn default_content_end_secs() -> u64 {
    180
}

fn default_catalog_path() -> PathBuf {
    platform::config_dir().join("catalog.toml")
}

fn default_quiet_zone() -> bool {
    true
}

impl Config {
    /// Load from the default location, writing a default file on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// A zero-length static phase would switch channels with no noise frame.
    fn validate(&self) -> Result<()> {
        if self.broadcast.power_on_static_ms == 0 || self.broadcast.channel_static_ms == 0 {
            return Err(Error::Config(
                "broadcast static durations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ui.theme, ThemeKind::Vista);
        assert_eq!(config.ui.start_page, StartPage::Desktop);
        assert!(config.ui.show_keys_bar);
        assert_eq!(config.broadcast.power_on_static_ms, 2000);
        assert_eq!(config.broadcast.channel_static_ms, 1000);
        assert!(config.share.handler.is_empty());
        assert_eq!(config.qr.level, QrLevel::M);
        assert!(config.catalog.path.ends_with("vrlab/catalog.toml"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [ui]
            theme = "xp"

            [broadcast]
            content_end_secs = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.theme, ThemeKind::Xp);
        assert!(config.ui.show_keys_bar);
        assert_eq!(config.broadcast.channel_static_ms, 1000);
        assert!(config.broadcast.timings().content_end.is_none());
    }

    #[test]
    fn test_zero_static_duration_rejected() {
        let err = Config::from_toml_str(
            r#"
            [broadcast]
            channel_static_ms = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_timings_from_config() {
        let timings = BroadcastConfig::default().timings();
        assert_eq!(timings.power_on_static, Duration::from_millis(2000));
        assert_eq!(timings.channel_static, Duration::from_millis(1000));
        assert_eq!(timings.content_end, Some(Duration::from_secs(180)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = platform::temp_dir().join(format!("vrlab-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = Config::default();
        config.ui.theme = ThemeKind::Xp;
        config.share.handler = "mailto:?body={url}".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ui.theme, ThemeKind::Xp);
        assert_eq!(loaded.share.handler, "mailto:?body={url}");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_theme_parse_and_toggle() {
        assert_eq!("XP".parse::<ThemeKind>(), Ok(ThemeKind::Xp));
        assert!("aero".parse::<ThemeKind>().is_err());
        assert_eq!(ThemeKind::Xp.toggled(), ThemeKind::Vista);
    }
}

//! System adapters for the core share and launch ports.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{debug, info};

use vrlab_core::config::ShareConfig;
use vrlab_core::launch::UrlLauncher;
use vrlab_core::share::{Clipboard, NativeShare, ShareError, SharePayload};

/// The desktop clipboard through `arboard`.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ShareError> {
        arboard::Clipboard::new()
            .and_then(|mut cb| cb.set_text(text.to_string()))
            .map_err(|e| ShareError::Clipboard(e.to_string()))
    }
}

/// Shares by opening a URL template such as a `mailto:` link.
pub struct TemplateShare {
    template: String,
}

impl TemplateShare {
    /// `None` when no handler is configured.
    pub fn from_config(config: &ShareConfig) -> Option<Self> {
        let template = config.handler.trim();
        if template.is_empty() {
            return None;
        }
        Some(Self {
            template: template.to_string(),
        })
    }

    pub fn expand(&self, payload: &SharePayload) -> String {
        self.template
            .replace("{title}", &percent_encode(&payload.title))
            .replace("{text}", &percent_encode(&payload.text))
            .replace("{url}", &percent_encode(&payload.url))
    }
}

impl NativeShare for TemplateShare {
    fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError> {
        let target = self.expand(payload);
        debug!("share via {}", target);
        open::that(&target).map_err(|e| ShareError::Native(e.to_string()))?;
        info!("opened share handler for {}", payload.url);
        Ok(())
    }
}

pub type Opener = Box<dyn FnMut(&str) -> std::io::Result<()>>;

/// Everything the app hands off to the operating system.
pub struct Ports {
    pub clipboard: Box<dyn Clipboard>,
    pub share: Option<Box<dyn NativeShare>>,
    pub launcher: UrlLauncher<Opener>,
}

impl Ports {
    pub fn system(share: &ShareConfig) -> Self {
        let opener: Opener = Box::new(|url: &str| open::that(url));
        Self {
            clipboard: Box::new(SystemClipboard),
            share: TemplateShare::from_config(share)
                .map(|s| Box::new(s) as Box<dyn NativeShare>),
            launcher: UrlLauncher::new(opener),
        }
    }
}

/// RFC 3986 unreserved characters pass through, everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SharePayload {
        SharePayload {
            title: "Hangar Bay".into(),
            text: "A hangar & more".into(),
            url: "https://example.org/a?b=1".into(),
        }
    }

    #[test]
    fn test_empty_handler_means_no_native_share() {
        assert!(TemplateShare::from_config(&ShareConfig::default()).is_none());
        let blank = ShareConfig {
            handler: "   ".into(),
        };
        assert!(TemplateShare::from_config(&blank).is_none());
    }

    #[test]
    fn test_template_expansion_encodes_values() {
        let config = ShareConfig {
            handler: "mailto:?subject={title}&body={url}".into(),
        };
        let share = TemplateShare::from_config(&config).unwrap();
        assert_eq!(
            share.expand(&payload()),
            "mailto:?subject=Hangar%20Bay&body=https%3A%2F%2Fexample.org%2Fa%3Fb%3D1"
        );
    }

    #[test]
    fn test_percent_encode_utf8() {
        assert_eq!(percent_encode("360°"), "360%C2%B0");
        assert_eq!(percent_encode("a-b_c.d~"), "a-b_c.d~");
        assert_eq!(percent_encode("a&b=c/d"), "a%26b%3Dc%2Fd");
    }
}

//! Share a link natively when possible, otherwise copy it.

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error("share cancelled")]
    Cancelled,
    #[error("native share failed: {0}")]
    Native(String),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Platform share sheet or equivalent.
pub trait NativeShare {
    fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError>;
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ShareError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    Failed(ShareError),
}

/// Try `native` first; on absence or failure copy the URL instead.
pub fn share_or_copy(
    native: Option<&mut dyn NativeShare>,
    clipboard: &mut dyn Clipboard,
    payload: &SharePayload,
) -> ShareOutcome {
    if let Some(native) = native {
        match native.share(payload) {
            Ok(()) => {
                info!("shared {}", payload.url);
                return ShareOutcome::Shared;
            }
            Err(e) => warn!("native share failed, copying instead: {}", e),
        }
    }
    match copy_link(clipboard, &payload.url) {
        Ok(()) => ShareOutcome::Copied,
        Err(e) => ShareOutcome::Failed(e),
    }
}

pub fn copy_link(clipboard: &mut dyn Clipboard, url: &str) -> Result<(), ShareError> {
    clipboard.write_text(url).map_err(|e| {
        warn!("clipboard write failed: {}", e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeClipboard {
        text: Option<String>,
        broken: bool,
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ShareError> {
            if self.broken {
                return Err(ShareError::Clipboard("no display".into()));
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    struct FakeShare {
        result: Result<(), ShareError>,
        calls: usize,
    }

    impl NativeShare for FakeShare {
        fn share(&mut self, _payload: &SharePayload) -> Result<(), ShareError> {
            self.calls += 1;
            self.result.clone()
        }
    }

    fn payload() -> SharePayload {
        SharePayload {
            title: "Hangar Bay".into(),
            text: "A virtual hangar".into(),
            url: "https://example.org/hangar".into(),
        }
    }

    #[test]
    fn test_native_share_wins() {
        let mut native = FakeShare {
            result: Ok(()),
            calls: 0,
        };
        let mut clip = FakeClipboard::default();
        let outcome = share_or_copy(Some(&mut native), &mut clip, &payload());
        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(native.calls, 1);
        assert!(clip.text.is_none());
    }

    #[test]
    fn test_falls_back_to_clipboard() {
        let mut clip = FakeClipboard::default();
        let outcome = share_or_copy(None, &mut clip, &payload());
        assert_eq!(outcome, ShareOutcome::Copied);
        assert_eq!(clip.text.as_deref(), Some("https://example.org/hangar"));
    }

    #[test]
    fn test_native_failure_copies() {
        let mut native = FakeShare {
            result: Err(ShareError::Cancelled),
            calls: 0,
        };
        let mut clip = FakeClipboard::default();
        let outcome = share_or_copy(Some(&mut native), &mut clip, &payload());
        assert_eq!(outcome, ShareOutcome::Copied);
    }

    #[test]
    fn test_both_paths_fail() {
        let mut clip = FakeClipboard {
            broken: true,
            ..Default::default()
        };
        let outcome = share_or_copy(None, &mut clip, &payload());
        assert!(matches!(outcome, ShareOutcome::Failed(ShareError::Clipboard(_))));
    }
}

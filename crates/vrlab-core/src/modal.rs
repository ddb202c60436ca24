//! Open/closed state for one modal, with a single close path.

use tracing::debug;

/// How a modal was dismissed. All of them lead to the same closed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Backdrop,
    CloseButton,
    Escape,
    /// Closed from outside the modal, e.g. the taskbar start button.
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal<T> {
    subject: Option<T>,
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Self { subject: None }
    }
}

impl<T> Modal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with `subject`, replacing whatever was shown before.
    pub fn open(&mut self, subject: T) {
        self.subject = Some(subject);
    }

    /// Close. Returns the subject that was showing, if any.
    pub fn close(&mut self, reason: DismissReason) -> Option<T> {
        let prev = self.subject.take();
        if prev.is_some() {
            debug!("modal closed: {:?}", reason);
        }
        prev
    }

    /// Open with `subject` when closed, otherwise close from outside.
    /// Returns whether the modal is open afterwards.
    pub fn toggle(&mut self, subject: T) -> bool {
        if self.is_open() {
            self.close(DismissReason::External);
            false
        } else {
            self.open(subject);
            true
        }
    }

    pub fn is_open(&self) -> bool {
        self.subject.is_some()
    }

    pub fn subject(&self) -> Option<&T> {
        self.subject.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_replaces_subject() {
        let mut modal = Modal::new();
        modal.open("a");
        modal.open("b");
        assert_eq!(modal.subject(), Some(&"b"));
    }

    #[test]
    fn test_every_dismissal_closes() {
        for reason in [
            DismissReason::Backdrop,
            DismissReason::CloseButton,
            DismissReason::Escape,
            DismissReason::External,
        ] {
            let mut modal = Modal::new();
            modal.open(1);
            assert_eq!(modal.close(reason), Some(1));
            assert!(!modal.is_open());
        }
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut modal: Modal<u8> = Modal::new();
        assert_eq!(modal.close(DismissReason::Escape), None);
        assert!(modal.toggle(3));
        assert_eq!(modal.subject(), Some(&3));
        assert!(!modal.toggle(4));
        assert!(!modal.is_open());
    }
}

//! Page router with a back stack.

use vrlab_core::config::StartPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Desktop,
    Projects,
    Course,
}

impl Page {
    /// Where "back" goes when nothing was visited before.
    pub fn parent(self) -> Option<Page> {
        match self {
            Self::Desktop => None,
            Self::Projects => Some(Self::Desktop),
            Self::Course => Some(Self::Projects),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Projects => "Projects",
            Self::Course => "VR Training Course",
        }
    }
}

impl From<StartPage> for Page {
    fn from(start: StartPage) -> Self {
        match start {
            StartPage::Desktop => Self::Desktop,
            StartPage::Projects => Self::Projects,
            StartPage::Course => Self::Course,
        }
    }
}

pub struct Router {
    current: Page,
    history: Vec<Page>,
}

impl Router {
    pub fn new(start: Page) -> Self {
        Self {
            current: start,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    /// Go to `page`. Navigating to the current page is a no-op.
    pub fn navigate(&mut self, page: Page) -> bool {
        if page == self.current {
            return false;
        }
        self.history.push(self.current);
        self.current = page;
        true
    }

    /// Pop the back stack, or fall back to the page's parent.
    pub fn back(&mut self) -> bool {
        let target = self.history.pop().or_else(|| self.current.parent());
        match target {
            Some(page) => {
                self.current = page;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_follows_history() {
        let mut router = Router::new(Page::Desktop);
        router.navigate(Page::Course);
        assert!(router.back());
        assert_eq!(router.current(), Page::Desktop);
        assert!(!router.back());
    }

    #[test]
    fn test_back_without_history_uses_parent() {
        let mut router = Router::new(Page::Course);
        router.back();
        assert_eq!(router.current(), Page::Projects);
        router.back();
        assert_eq!(router.current(), Page::Desktop);
    }

    #[test]
    fn test_navigate_to_same_page_is_noop() {
        let mut router = Router::new(Page::Projects);
        assert!(!router.navigate(Page::Projects));
        router.back();
        assert_eq!(router.current(), Page::Desktop);
    }
}

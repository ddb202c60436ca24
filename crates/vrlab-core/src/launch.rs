//! Port for "open this item" clicks.

use thiserror::Error;

use crate::catalog::CatalogItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The item's URL was handed to the system, unmodified.
    Opened(String),
    /// The item has nothing to open.
    Unavailable,
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("failed to open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

pub trait LaunchHandler {
    fn on_launch(&mut self, item: &CatalogItem) -> Result<LaunchOutcome, LaunchError>;
}

/// Launches by calling `open` with the item's URL.
pub struct UrlLauncher<F> {
    open: F,
}

impl<F> UrlLauncher<F>
where
    F: FnMut(&str) -> std::io::Result<()>,
{
    pub fn new(open: F) -> Self {
        Self { open }
    }

    pub fn open_url(&mut self, url: &str) -> Result<LaunchOutcome, LaunchError> {
        (self.open)(url).map_err(|source| LaunchError::Open {
            url: url.to_string(),
            source,
        })?;
        Ok(LaunchOutcome::Opened(url.to_string()))
    }
}

impl<F> LaunchHandler for UrlLauncher<F>
where
    F: FnMut(&str) -> std::io::Result<()>,
{
    fn on_launch(&mut self, item: &CatalogItem) -> Result<LaunchOutcome, LaunchError> {
        match item.url.as_deref() {
            Some(url) => self.open_url(url),
            None => Ok(LaunchOutcome::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Content, ItemId};

    #[test]
    fn test_url_passed_through() {
        let content = Content::embedded().unwrap();
        let item = content.projects.get(&ItemId::new("hangar-bay")).unwrap();
        let mut opened = Vec::new();
        let mut launcher = UrlLauncher::new(|url: &str| {
            opened.push(url.to_string());
            Ok(())
        });
        let outcome = launcher.on_launch(item).unwrap();
        drop(launcher);
        assert_eq!(opened, vec![item.url.clone().unwrap()]);
        assert_eq!(outcome, LaunchOutcome::Opened(item.url.clone().unwrap()));
    }

    #[test]
    fn test_item_without_url_is_unavailable() {
        let content = Content::embedded().unwrap();
        let tool = &content.launcher.items()[0];
        let mut launcher = UrlLauncher::new(|_: &str| -> std::io::Result<()> {
            panic!("nothing should open")
        });
        assert_eq!(launcher.on_launch(tool).unwrap(), LaunchOutcome::Unavailable);
    }

    #[test]
    fn test_open_failure_is_reported() {
        let content = Content::embedded().unwrap();
        let item = &content.art_studio.items()[0];
        let mut launcher = UrlLauncher::new(|_: &str| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no opener"))
        });
        assert!(matches!(
            launcher.on_launch(item),
            Err(LaunchError::Open { .. })
        ));
    }
}

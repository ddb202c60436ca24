//! Grid-to-detail navigation inside one catalog view.

use crate::catalog::{Catalog, CatalogItem, ItemId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DrillDown {
    #[default]
    Grid,
    Detail(ItemId),
}

impl DrillDown {
    /// Enter detail for `item`. Items without a detail page and selections
    /// made while already in detail are ignored.
    pub fn select(&mut self, item: &CatalogItem) -> bool {
        if !item.has_detail() || self.is_detail() {
            return false;
        }
        *self = Self::Detail(item.id.clone());
        true
    }

    /// Return to the grid. A no-op when already there.
    pub fn back(&mut self) -> bool {
        if !self.is_detail() {
            return false;
        }
        *self = Self::Grid;
        true
    }

    pub fn selected(&self) -> Option<&ItemId> {
        match self {
            Self::Grid => None,
            Self::Detail(id) => Some(id),
        }
    }

    pub fn is_detail(&self) -> bool {
        matches!(self, Self::Detail(_))
    }

    /// The item shown in detail, if it still exists in `catalog`.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Option<&'a CatalogItem> {
        self.selected().and_then(|id| catalog.get(id))
    }
}

//! Category filter shared by the gallery, the art studio and the launcher.
//!
//! `All` is the identity filter. Filtering never reorders and never fails:
//! a category with no members simply yields an empty result.

use crate::catalog::Category;

/// Anything that belongs to exactly one category.
pub trait Categorized {
    fn category(&self) -> &Category;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches<T: Categorized + ?Sized>(&self, item: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category() == category,
        }
    }

    /// Order-preserving sub-sequence of `items` that passes the filter.
    pub fn apply<'a, T: Categorized>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.as_str(),
        }
    }
}

/// The active filter of one view plus its tab order.
#[derive(Debug, Clone)]
pub struct FilterState {
    active: CategoryFilter,
    tabs: Vec<CategoryFilter>,
}

impl FilterState {
    /// Tabs are `All` followed by `categories` in the given order.
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut tabs = vec![CategoryFilter::All];
        tabs.extend(categories.into_iter().map(CategoryFilter::Only));
        Self {
            active: CategoryFilter::All,
            tabs,
        }
    }

    pub fn active(&self) -> &CategoryFilter {
        &self.active
    }

    pub fn tabs(&self) -> &[CategoryFilter] {
        &self.tabs
    }

    /// Replace the active filter. Returns `true` when the value changed.
    pub fn set(&mut self, filter: CategoryFilter) -> bool {
        if self.active == filter {
            return false;
        }
        self.active = filter;
        true
    }

    pub fn cycle_next(&mut self) -> bool {
        let pos = self.position();
        let next = self.tabs[(pos + 1) % self.tabs.len()].clone();
        self.set(next)
    }

    pub fn cycle_prev(&mut self) -> bool {
        let pos = self.position();
        let prev = self.tabs[(pos + self.tabs.len() - 1) % self.tabs.len()].clone();
        self.set(prev)
    }

    /// Select the tab at `idx`; out-of-range indices are ignored.
    pub fn set_by_position(&mut self, idx: usize) -> bool {
        match self.tabs.get(idx).cloned() {
            Some(filter) => self.set(filter),
            None => false,
        }
    }

    pub fn position(&self) -> usize {
        self.tabs
            .iter()
            .position(|t| *t == self.active)
            .unwrap_or(0)
    }

    pub fn matches<T: Categorized + ?Sized>(&self, item: &T) -> bool {
        self.active.matches(item)
    }
}

/// Distinct categories of `items` in first-seen order.
pub fn categories_of<T: Categorized>(items: &[T]) -> Vec<Category> {
    let mut seen: Vec<Category> = Vec::new();
    for item in items {
        if !seen.contains(item.category()) {
            seen.push(item.category().clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        id: &'static str,
        category: Category,
    }

    impl Categorized for Item {
        fn category(&self) -> &Category {
            &self.category
        }
    }

    fn item(id: &'static str, category: &str) -> Item {
        Item {
            id,
            category: Category::new(category),
        }
    }

    fn ids(items: &[&Item]) -> Vec<&'static str> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_filter_keeps_order() {
        let catalog = vec![item("a", "Free"), item("b", "Pro"), item("c", "Free")];
        let filter = CategoryFilter::Only(Category::new("Free"));
        assert_eq!(ids(&filter.apply(&catalog)), vec!["a", "c"]);
    }

    #[test]
    fn test_all_is_identity() {
        let catalog = vec![item("a", "Free"), item("b", "Pro"), item("c", "Free")];
        assert_eq!(ids(&CategoryFilter::All.apply(&catalog)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_category_yields_empty() {
        let catalog = vec![item("a", "Free")];
        let filter = CategoryFilter::Only(Category::new("Experimental"));
        assert!(filter.apply(&catalog).is_empty());
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut state = FilterState::new([Category::new("VR"), Category::new("Web")]);
        assert!(state.set(CategoryFilter::Only(Category::new("VR"))));
        assert!(!state.set(CategoryFilter::Only(Category::new("VR"))));
        assert_eq!(state.active().label(), "VR");
    }

    #[test]
    fn test_cycle_wraps() {
        let mut state = FilterState::new([Category::new("VR"), Category::new("Web")]);
        state.cycle_prev();
        assert_eq!(state.active().label(), "Web");
        state.cycle_next();
        assert_eq!(*state.active(), CategoryFilter::All);
        assert!(!state.set_by_position(9));
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = vec![item("a", "Pro"), item("b", "Free"), item("c", "Pro")];
        let cats = categories_of(&catalog);
        assert_eq!(cats, vec![Category::new("Pro"), Category::new("Free")]);
    }
}

//! Generic filterable list with a cursor that follows its item.

pub struct ScrollableList<T> {
    pub items: Vec<T>,
    pub filtered_indices: Vec<usize>,
    pub selected: usize,
}

impl<T> ScrollableList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            filtered_indices: Vec::new(),
            selected: 0,
        }
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.filtered_indices = (0..self.items.len()).collect();
        self.selected = 0;
    }

    /// Rebuild the visible subset. The cursor stays on the same item when
    /// it survives the filter, otherwise it goes back to the first row.
    pub fn refilter(&mut self, keep: impl Fn(&T) -> bool) {
        let old_idx = self.selected_original_index();
        self.filtered_indices = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| keep(item))
            .map(|(i, _)| i)
            .collect();
        self.selected = old_idx
            .and_then(|prev| self.filtered_indices.iter().position(|&i| i == prev))
            .unwrap_or(0);
    }

    pub fn select_up(&mut self, n: usize) {
        if self.filtered_indices.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.filtered_indices.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.filtered_indices.len().saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.filtered_indices.len().saturating_sub(1);
    }

    /// Select by position in the filtered view. Out of range is ignored.
    pub fn select_visible(&mut self, pos: usize) -> bool {
        if pos < self.filtered_indices.len() {
            self.selected = pos;
            return true;
        }
        false
    }

    pub fn selected_item(&self) -> Option<&T> {
        let idx = self.filtered_indices.get(self.selected)?;
        self.items.get(*idx)
    }

    pub fn selected_original_index(&self) -> Option<usize> {
        self.filtered_indices.get(self.selected).copied()
    }

    /// Items in the filtered view, in order.
    pub fn visible(&self) -> impl Iterator<Item = &T> {
        self.filtered_indices.iter().map(|&i| &self.items[i])
    }

    pub fn len(&self) -> usize {
        self.filtered_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_indices.is_empty()
    }

    pub fn total_len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for ScrollableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ScrollableList<&'static str> {
        let mut list = ScrollableList::new();
        list.set_items(vec!["quill", "openbrush", "tvori", "poly"]);
        list
    }

    #[test]
    fn test_cursor_follows_surviving_item() {
        let mut list = list();
        list.select_down(2);
        assert_eq!(list.selected_item(), Some(&"tvori"));
        list.refilter(|s| s.contains('o'));
        assert_eq!(list.selected_item(), Some(&"tvori"));
        assert_eq!(list.selected, 1);
    }

    #[test]
    fn test_cursor_resets_when_item_filtered_out() {
        let mut list = list();
        list.select_last();
        list.refilter(|s| s.starts_with('q') || s.starts_with('t'));
        assert_eq!(list.selected, 0);
        assert_eq!(list.selected_item(), Some(&"quill"));
    }

    #[test]
    fn test_empty_view() {
        let mut list = list();
        list.refilter(|_| false);
        assert!(list.is_empty());
        assert_eq!(list.selected_item(), None);
        list.select_down(3);
        assert_eq!(list.selected, 0);
        assert_eq!(list.total_len(), 4);
    }

    #[test]
    fn test_select_clamps() {
        let mut list = list();
        list.select_down(10);
        assert_eq!(list.selected, 3);
        list.select_up(10);
        assert_eq!(list.selected, 0);
        assert!(!list.select_visible(9));
    }
}

//! FocusRing — keyboard focus across the desktop and its open windows.
//!
//! The last item raised is the front window; drawing order follows the ring
//! with the focused item painted last.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn items(&self) -> &[ComponentId] {
        &self.items
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == Some(id)
    }

    /// Add `id` if missing and focus it.
    pub fn raise(&mut self, id: ComponentId) {
        if !self.items.contains(&id) {
            self.items.push(id);
        }
        self.set(id);
    }

    /// Remove `id`. Focus falls back to the previous item.
    pub fn remove(&mut self, id: ComponentId) {
        let Some(pos) = self.items.iter().position(|&x| x == id) else {
            return;
        };
        let was_focused = pos == self.current;
        self.items.remove(pos);
        if self.items.is_empty() {
            self.current = 0;
        } else if was_focused || pos < self.current {
            self.current = self.current.saturating_sub(1);
        }
    }

    /// Items in paint order: everything unfocused first, the focused one last.
    pub fn paint_order(&self) -> Vec<ComponentId> {
        let focused = self.current();
        let mut order: Vec<ComponentId> = self
            .items
            .iter()
            .copied()
            .filter(|&id| Some(id) != focused)
            .collect();
        order.extend(focused);
        order
    }
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_and_remove() {
        let mut ring = FocusRing::new(vec![ComponentId::Desktop]);
        ring.raise(ComponentId::Launcher);
        ring.raise(ComponentId::Television);
        assert!(ring.is_focused(ComponentId::Television));

        ring.remove(ComponentId::Television);
        assert!(ring.is_focused(ComponentId::Launcher));
        ring.remove(ComponentId::Launcher);
        assert!(ring.is_focused(ComponentId::Desktop));
    }

    #[test]
    fn test_remove_unfocused_keeps_focus() {
        let mut ring = FocusRing::new(vec![ComponentId::Desktop]);
        ring.raise(ComponentId::Launcher);
        ring.raise(ComponentId::Television);
        ring.remove(ComponentId::Launcher);
        assert!(ring.is_focused(ComponentId::Television));
    }

    #[test]
    fn test_paint_order_puts_focused_last() {
        let mut ring = FocusRing::new(vec![ComponentId::Desktop]);
        ring.raise(ComponentId::Launcher);
        ring.raise(ComponentId::Television);
        ring.set(ComponentId::Launcher);
        assert_eq!(
            ring.paint_order(),
            vec![
                ComponentId::Desktop,
                ComponentId::Television,
                ComponentId::Launcher
            ]
        );
    }

    #[test]
    fn test_cycle_wraps() {
        let mut ring = FocusRing::new(vec![ComponentId::Desktop, ComponentId::Launcher]);
        assert_eq!(ring.next(), Some(ComponentId::Launcher));
        assert_eq!(ring.next(), Some(ComponentId::Desktop));
        assert_eq!(ring.prev(), Some(ComponentId::Launcher));
    }
}

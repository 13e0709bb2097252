use std::collections::BTreeSet;

use ratatui::widgets::ListState;

use crate::infrastructure::persistence::{Persistence, load_or, save};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectItem {
    pub id: String,
    pub label: String,
}

/// A remembered multi-select input.
pub struct MultiSelect {
    pub title: &'static str,
    pub storage_key: &'static str,
    pub items: Vec<SelectItem>,
    pub selected: BTreeSet<String>,
    pub list_state: ListState,
}

impl MultiSelect {
    pub fn new(
        title: &'static str,
        storage_key: &'static str,
        items: Vec<SelectItem>,
        store: &dyn Persistence,
    ) -> Self {
        let selected: BTreeSet<String> = load_or(store, storage_key, BTreeSet::new());
        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            title,
            storage_key,
            items,
            selected,
            list_state,
        }
    }

    /// Swaps the option list, keeping the selection and clamping the cursor.
    pub fn set_items(&mut self, items: Vec<SelectItem>) {
        self.items = items;
        let cursor = match (self.list_state.selected(), self.items.len()) {
            (_, 0) => None,
            (Some(idx), len) => Some(idx.min(len - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(cursor);
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(idx) if idx + 1 < self.items.len() => idx + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(idx) => idx - 1,
        };
        self.list_state.select(Some(prev));
    }

    pub fn is_selected(&self, item: &SelectItem) -> bool {
        self.selected.contains(&item.id)
    }

    /// Flips the item under the cursor and returns the new selection.
    pub fn toggle_current(&mut self, store: &mut dyn Persistence) -> Option<BTreeSet<String>> {
        let item = self.list_state.selected().and_then(|idx| self.items.get(idx))?;
        if !self.selected.remove(&item.id) {
            self.selected.insert(item.id.clone());
        }
        self.remember(store);
        Some(self.selected.clone())
    }

    pub fn reset(&mut self, store: &mut dyn Persistence) {
        self.selected.clear();
        self.remember(store);
    }

    fn remember(&self, store: &mut dyn Persistence) {
        if let Err(error) = save(store, self.storage_key, &self.selected) {
            tracing::warn!(key = self.storage_key, %error, "cannot remember selection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::MemoryStore;

    fn items(ids: &[&str]) -> Vec<SelectItem> {
        ids.iter()
            .map(|id| SelectItem {
                id: id.to_string(),
                label: id.to_uppercase(),
            })
            .collect()
    }

    #[test]
    fn toggling_selects_and_deselects() {
        let mut store = MemoryStore::default();
        let mut select = MultiSelect::new("Projects", "k", items(&["p1", "p2"]), &store);
        select.next();
        let selected = select.toggle_current(&mut store).unwrap();
        assert!(selected.contains("p2"));
        let selected = select.toggle_current(&mut store).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn restores_the_remembered_selection() {
        let mut store = MemoryStore::default();
        let mut first = MultiSelect::new("Task", "timesheet-select-filter-task", items(&["t1"]), &store);
        first.toggle_current(&mut store);

        let second = MultiSelect::new("Task", "timesheet-select-filter-task", items(&["t1"]), &store);
        assert!(second.is_selected(&second.items[0]));
    }

    #[test]
    fn reset_forgets_the_selection() {
        let mut store = MemoryStore::default();
        let mut select = MultiSelect::new("Status", "s", items(&["Draft"]), &store);
        select.toggle_current(&mut store);
        select.reset(&mut store);

        assert!(select.selected.is_empty());
        let reloaded = MultiSelect::new("Status", "s", items(&["Draft"]), &store);
        assert!(reloaded.selected.is_empty());
    }

    #[test]
    fn cursor_wraps_and_survives_item_swaps() {
        let store = MemoryStore::default();
        let mut select = MultiSelect::new("Employee", "e", items(&["a", "b", "c"]), &store);
        select.previous();
        assert_eq!(select.list_state.selected(), Some(2));
        select.set_items(items(&["a"]));
        assert_eq!(select.list_state.selected(), Some(0));
        select.set_items(Vec::new());
        assert_eq!(select.list_state.selected(), None);
    }
}

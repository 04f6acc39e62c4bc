//! In-memory item list, the source of truth once loaded.
//!
//! Lookups are by exact name. Names are not checked for uniqueness on add;
//! when duplicates exist every name-keyed operation acts on the first match
//! in store order.

use crate::model::Item;

/// Ordered list of items, kept in insertion/maintenance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a store from previously persisted items, keeping their order.
    #[must_use]
    pub const fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item with exactly `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }

    /// Insert `{name, inventory: 0}` and re-sort the whole list by name.
    ///
    /// Returns `false` without touching the list when `name` is empty.
    pub fn add(&mut self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.items.push(Item::new(name));
        self.items.sort_by(|a, b| a.name.cmp(&b.name));
        true
    }

    /// Shift the inventory of `name` by `delta`, clamped at zero.
    ///
    /// Returns `false` if no item has that name.
    pub fn adjust_inventory(&mut self, name: &str, delta: i64) -> bool {
        let Some(idx) = self.position(name) else {
            return false;
        };
        self.items[idx].adjust(delta);
        true
    }

    /// Remove the first item named `name`. Returns `false` if none matched.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(idx) = self.position(name) else {
            return false;
        };
        self.items.remove(idx);
        true
    }
}

//! Derived display rows: sort, then filter, never touching the store.

use crate::model::{Item, SortMode};
use serde::Serialize;
use std::cmp::Ordering;

/// One projected row, tagged with its position in the displayed sequence.
///
/// The position is what a front end hands back with delete/adjust intents;
/// the session resolves it to `name` through the last computed rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub position: usize,
    pub name: String,
    pub inventory: u64,
}

/// Case-insensitive substring match of `filter` against `name`.
///
/// An empty filter matches everything.
#[must_use]
pub fn matches_filter(name: &str, filter: &str) -> bool {
    filter.is_empty() || name.to_lowercase().contains(&filter.to_lowercase())
}

fn compare(a: &Item, b: &Item, mode: SortMode) -> Ordering {
    let by_inventory = match mode {
        SortMode::Unsorted => Ordering::Equal,
        SortMode::Ascending => a.inventory.cmp(&b.inventory),
        SortMode::Descending => b.inventory.cmp(&a.inventory),
    };
    // Name breaks ties ascending in both directions.
    by_inventory.then_with(|| a.name.cmp(&b.name))
}

/// Sort a mutable slice of items by the given mode. `Unsorted` leaves the
/// slice as is.
pub fn sort_items(items: &mut [Item], mode: SortMode) {
    if mode == SortMode::Unsorted {
        return;
    }
    items.sort_by(|a, b| compare(a, b, mode));
}

/// Compute the displayed rows from the store contents, filter text and sort
/// mode.
#[must_use]
pub fn project(items: &[Item], filter: &str, mode: SortMode) -> Vec<DisplayRow> {
    let mut ordered = items.to_vec();
    sort_items(&mut ordered, mode);

    ordered
        .into_iter()
        .filter(|item| matches_filter(&item.name, filter))
        .enumerate()
        .map(|(position, item)| DisplayRow {
            position,
            name: item.name,
            inventory: item.inventory,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, inventory: u64) -> Item {
        Item::with_inventory(name, inventory)
    }

    fn names(rows: &[DisplayRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn unsorted_unfiltered_keeps_store_order() {
        let items = vec![item("Zucchini", 1), item("Apples", 9), item("Milk", 4)];
        let rows = project(&items, "", SortMode::Unsorted);
        assert_eq!(names(&rows), ["Zucchini", "Apples", "Milk"]);
        assert_eq!(
            rows.iter().map(|r| r.position).collect::<Vec<_>>(),
            [0, 1, 2]
        );
    }

    #[test]
    fn ascending_orders_by_inventory() {
        let items = vec![item("B", 5), item("A", 2), item("C", 3)];
        let rows = project(&items, "", SortMode::Ascending);
        assert_eq!(names(&rows), ["A", "C", "B"]);
    }

    #[test]
    fn descending_orders_by_inventory() {
        let items = vec![item("B", 5), item("A", 2), item("C", 3)];
        let rows = project(&items, "", SortMode::Descending);
        assert_eq!(names(&rows), ["B", "C", "A"]);
    }

    #[test]
    fn ties_break_by_name_ascending_in_both_directions() {
        let items = vec![item("Pear", 2), item("Fig", 2), item("Kiwi", 7)];
        assert_eq!(
            names(&project(&items, "", SortMode::Ascending)),
            ["Fig", "Pear", "Kiwi"]
        );
        assert_eq!(
            names(&project(&items, "", SortMode::Descending)),
            ["Kiwi", "Fig", "Pear"]
        );
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let items = vec![item("Green Tea", 1), item("Coffee", 2), item("TEAPOT", 0)];
        let rows = project(&items, "tEa", SortMode::Unsorted);
        assert_eq!(names(&rows), ["Green Tea", "TEAPOT"]);
    }

    #[test]
    fn filter_keeps_sorted_relative_order_and_renumbers() {
        let items = vec![item("tea b", 9), item("coffee", 1), item("tea a", 3)];
        let rows = project(&items, "tea", SortMode::Ascending);
        assert_eq!(names(&rows), ["tea a", "tea b"]);
        assert_eq!(rows[0].position, 0);
        assert_eq!(rows[1].position, 1);
    }

    #[test]
    fn filter_with_no_match_is_empty() {
        let items = vec![item("Rice", 1)];
        assert!(project(&items, "bread", SortMode::Descending).is_empty());
    }

    #[test]
    fn project_does_not_mutate_input() {
        let items = vec![item("B", 5), item("A", 2)];
        let before = items.clone();
        let _ = project(&items, "a", SortMode::Ascending);
        assert_eq!(items, before);
    }

    #[test]
    fn matches_filter_handles_unicode_case() {
        assert!(matches_filter("Crème Brûlée", "BRÛLÉE"));
        assert!(matches_filter("anything", ""));
        assert!(!matches_filter("Rice", "ricer"));
    }
}

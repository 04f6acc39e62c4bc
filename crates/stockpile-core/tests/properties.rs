use proptest::prelude::*;
use stockpile_core::persist::{Gateway, MemoryKvStore};
use stockpile_core::view::{matches_filter, project};
use stockpile_core::{Intent, Session, SortMode};

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn unsorted_unfiltered_projection_is_store_order(items in arb_items()) {
        let rows = project(&items, "", SortMode::Unsorted);
        prop_assert_eq!(rows.len(), items.len());
        for (row, item) in rows.iter().zip(&items) {
            prop_assert_eq!(&row.name, &item.name);
            prop_assert_eq!(row.inventory, item.inventory);
        }
    }

    #[test]
    fn filtering_preserves_sorted_relative_order(
        items in arb_items(),
        filter in arb_name(),
        mode in arb_sort_mode(),
    ) {
        let sorted = project(&items, "", mode);
        let expected: Vec<(String, u64)> = sorted
            .into_iter()
            .filter(|row| matches_filter(&row.name, &filter))
            .map(|row| (row.name, row.inventory))
            .collect();
        let filtered: Vec<(String, u64)> = project(&items, &filter, mode)
            .into_iter()
            .map(|row| (row.name, row.inventory))
            .collect();
        prop_assert_eq!(filtered, expected);
    }

    #[test]
    fn sorted_projection_is_ordered_with_name_tie_break(
        items in arb_items(),
        descending in any::<bool>(),
    ) {
        let mode = if descending { SortMode::Descending } else { SortMode::Ascending };
        let rows = project(&items, "", mode);
        for pair in rows.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.inventory == b.inventory {
                prop_assert!(a.name <= b.name, "tie not broken by name: {:?} {:?}", a, b);
            } else if descending {
                prop_assert!(a.inventory > b.inventory);
            } else {
                prop_assert!(a.inventory < b.inventory);
            }
        }
    }

    #[test]
    fn row_positions_are_contiguous(
        items in arb_items(),
        filter in arb_name(),
        mode in arb_sort_mode(),
    ) {
        let rows = project(&items, &filter, mode);
        for (idx, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.position, idx);
        }
    }

    #[test]
    fn intents_keep_invariants(
        seed in arb_items(),
        intents in prop::collection::vec(arb_intent(), 0..40),
    ) {
        let kv = MemoryKvStore::new();
        Gateway::new(&kv).save(&seed);
        let mut session = Session::open(Gateway::new(&kv), Vec::new());

        for intent in intents {
            let adds = matches!(&intent, Intent::AddItem(name) if !name.is_empty());
            let before_notices = session.notifier().len();
            let before_items = session.items().to_vec();
            let empty_add = matches!(&intent, Intent::AddItem(name) if name.is_empty());

            session.dispatch(intent);

            // Rows always equal a fresh projection of the current inputs.
            let fresh = project(session.items(), session.filter(), session.sort_mode());
            prop_assert_eq!(session.rows(), fresh.as_slice());
            // Whatever landed in memory landed on disk too.
            prop_assert_eq!(Gateway::new(&kv).load(), session.items().to_vec());

            if adds {
                prop_assert_eq!(session.sort_mode(), SortMode::Unsorted);
                prop_assert_eq!(session.filter(), "");
                let names: Vec<&str> = session.items().iter().map(|i| i.name.as_str()).collect();
                let mut sorted = names.clone();
                sorted.sort_unstable();
                prop_assert_eq!(names, sorted);
            }
            if empty_add {
                prop_assert_eq!(session.items(), before_items.as_slice());
                prop_assert_eq!(session.notifier().len(), before_notices + 1);
                prop_assert_eq!(session.notifier().last().map(String::as_str), Some("Enter item name"));
            }
        }
    }

    #[test]
    fn sort_cycle_has_period_three(cycles in 0usize..30) {
        let mut session = Session::open(Gateway::new(MemoryKvStore::new()), Vec::new());
        for _ in 0..cycles {
            session.on_sort_cycle();
        }
        prop_assert_eq!(session.sort_mode(), SortMode::ALL[cycles % 3]);
    }
}

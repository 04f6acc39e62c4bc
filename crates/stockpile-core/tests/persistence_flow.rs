//! End-to-end flows through a session backed by the on-disk store.

use stockpile_core::model::{Item, SortMode};
use stockpile_core::persist::{FileKvStore, Gateway, KvStore};
use stockpile_core::session::{EMPTY_NAME_NOTICE, Intent, Session};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Session<FileKvStore, Vec<String>> {
    let kv = FileKvStore::new(dir.path()).with_lock_timeout(Duration::from_millis(200));
    Session::open(Gateway::new(kv), Vec::new())
}

fn row_labels(session: &Session<FileKvStore, Vec<String>>) -> Vec<(String, u64)> {
    session
        .rows()
        .iter()
        .map(|r| (r.name.clone(), r.inventory))
        .collect()
}

#[test]
fn fresh_directory_starts_empty() {
    let dir = TempDir::new().unwrap();
    let session = open(&dir);
    assert!(session.items().is_empty());
    assert!(session.rows().is_empty());
    assert!(!dir.path().join("items.json").exists());
}

#[test]
fn changes_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open(&dir);
        assert!(session.dispatch(Intent::AddItem("Milk".into())));
        assert!(session.dispatch(Intent::AddItem("Eggs".into())));
        // Rows are name-sorted after an add: Eggs, Milk.
        assert!(session.dispatch(Intent::AdjustRow { row: 0, delta: 12 }));
        assert!(session.dispatch(Intent::AdjustRow { row: 1, delta: 1 }));
        assert!(session.dispatch(Intent::AdjustRow { row: 1, delta: -1 }));
        assert!(session.dispatch(Intent::AdjustRow { row: 1, delta: 2 }));
    }

    let reopened = open(&dir);
    assert_eq!(
        reopened.items(),
        [Item::with_inventory("Eggs", 12), Item::with_inventory("Milk", 2)]
    );
    assert_eq!(reopened.sort_mode(), SortMode::Unsorted);
    assert_eq!(reopened.filter(), "");
}

#[test]
fn sorted_and_filtered_rows_target_the_displayed_item() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);
    for name in ["Apples", "Bananas", "Cherries"] {
        session.dispatch(Intent::AddItem(name.into()));
    }
    session.adjust_item("Apples", 3);
    session.adjust_item("Bananas", 7);
    session.adjust_item("Cherries", 1);

    session.dispatch(Intent::CycleSort);
    session.dispatch(Intent::CycleSort);
    assert_eq!(session.sort_mode(), SortMode::Descending);
    assert_eq!(
        row_labels(&session),
        [
            ("Bananas".to_string(), 7),
            ("Apples".to_string(), 3),
            ("Cherries".to_string(), 1)
        ]
    );

    session.dispatch(Intent::FilterTextChanged("an".into()));
    assert_eq!(row_labels(&session), [("Bananas".to_string(), 7)]);
    assert!(session.dispatch(Intent::DeleteRow(0)));

    let on_disk = Gateway::new(FileKvStore::new(dir.path())).try_load().unwrap();
    assert_eq!(
        on_disk,
        [
            Item::with_inventory("Apples", 3),
            Item::with_inventory("Cherries", 1)
        ]
    );
}

#[test]
fn empty_add_touches_nothing_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);
    assert!(!session.dispatch(Intent::AddItem(String::new())));
    assert_eq!(session.notifier().as_slice(), [EMPTY_NAME_NOTICE]);
    assert!(!dir.path().join("items.json").exists());
}

#[test]
fn corrupt_file_loads_empty_and_is_replaced_on_next_change() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("items.json"), "[{\"name\": \"Eggs\"").unwrap();

    let mut session = open(&dir);
    assert!(session.items().is_empty());

    session.dispatch(Intent::AddItem("Rice".into()));
    let raw = fs::read_to_string(dir.path().join("items.json")).unwrap();
    assert_eq!(raw, r#"[{"name":"Rice","inventory":0}]"#);
}

#[test]
fn blob_written_elsewhere_is_picked_up() {
    let dir = TempDir::new().unwrap();
    let kv = FileKvStore::new(dir.path());
    kv.set(
        "items",
        br#"[{"name":"Salt","inventory":1},{"name":"Flour","inventory":4}]"#,
    )
    .unwrap();

    let session = open(&dir);
    // Loaded order is kept until the next add.
    assert_eq!(
        row_labels(&session),
        [("Salt".to_string(), 1), ("Flour".to_string(), 4)]
    );
}

//! Intent handlers: the single owner of the item store.
//!
//! A [`Session`] holds the store, the filter text, the sort mode and the last
//! computed display rows. Every intent that mutates the store is followed by
//! a best-effort save and a recompute, so [`Session::rows`] always reflects
//! the latest store, filter and sort mode.
//!
//! Row-addressed intents (delete/adjust) resolve the row to an item name via
//! the last computed rows, then act on the store by name. An index that no
//! longer resolves is a silent no-op.

use crate::error::ErrorCode;
use crate::model::{Item, SortMode};
use crate::persist::{Gateway, KvStore};
use crate::store::ItemStore;
use crate::view::{DisplayRow, project};

/// Notification shown when an add is attempted with an empty name.
pub const EMPTY_NAME_NOTICE: &str = ErrorCode::EmptyItemName.message();

/// Fire-and-forget side channel for transient user notifications.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Collects notifications in order; handy for tests and one-shot commands.
impl Notifier for Vec<String> {
    fn notify(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Sends notifications to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        tracing::debug!(notice = message, "notification");
    }
}

/// A user intent emitted by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The combined filter/new-item text changed.
    FilterTextChanged(String),
    /// Advance to the next sort mode.
    CycleSort,
    /// Add an item with this name.
    AddItem(String),
    /// Delete the item shown at this display row.
    DeleteRow(usize),
    /// Adjust the inventory of the item shown at this display row.
    AdjustRow { row: usize, delta: i64 },
}

pub struct Session<K, N> {
    store: ItemStore,
    gateway: Gateway<K>,
    notifier: N,
    filter: String,
    sort: SortMode,
    rows: Vec<DisplayRow>,
    persisted: bool,
}

impl<K: KvStore, N: Notifier> Session<K, N> {
    /// Load the persisted list (empty on any failure) and compute the first
    /// projection. Sort mode starts `unsorted`, filter empty.
    pub fn open(gateway: Gateway<K>, notifier: N) -> Self {
        let store = ItemStore::from_items(gateway.load());
        let mut session = Self {
            store,
            gateway,
            notifier,
            filter: String::new(),
            sort: SortMode::default(),
            rows: Vec::new(),
            persisted: true,
        };
        session.recompute();
        session
    }

    #[must_use]
    pub const fn store(&self) -> &ItemStore {
        &self.store
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    /// Rows from the most recent projection.
    #[must_use]
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub const fn sort_mode(&self) -> SortMode {
        self.sort
    }

    /// Whether the most recent save landed. Stays `true` until a mutation
    /// fails to persist; the next successful save sets it back.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.persisted
    }

    #[must_use]
    pub const fn gateway(&self) -> &Gateway<K> {
        &self.gateway
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Name of the item shown at `row`, if that row still exists.
    #[must_use]
    pub fn row_name(&self, row: usize) -> Option<&str> {
        self.rows.get(row).map(|r| r.name.as_str())
    }

    /// Route an intent to its handler. Returns whether anything changed.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        tracing::trace!(?intent, "dispatch");
        match intent {
            Intent::FilterTextChanged(text) => {
                self.on_filter_text_changed(text);
                true
            }
            Intent::CycleSort => {
                self.on_sort_cycle();
                true
            }
            Intent::AddItem(name) => self.on_add_item(&name),
            Intent::DeleteRow(row) => self.on_delete_row(row),
            Intent::AdjustRow { row, delta } => self.on_adjust_row(row, delta),
        }
    }

    pub fn on_filter_text_changed(&mut self, text: impl Into<String>) {
        self.filter = text.into();
        self.recompute();
    }

    /// Advance the sort mode and clear the filter. The store is untouched.
    pub fn on_sort_cycle(&mut self) {
        self.sort = self.sort.next();
        self.filter.clear();
        self.recompute();
    }

    /// Add `{name, 0}`, reset sort mode and filter, persist.
    ///
    /// An empty name only emits [`EMPTY_NAME_NOTICE`].
    pub fn on_add_item(&mut self, name: &str) -> bool {
        if name.is_empty() {
            self.notifier.notify(EMPTY_NAME_NOTICE);
            return false;
        }
        if self.store.get(name).is_some() {
            tracing::debug!(name, "adding an item whose name already exists");
        }
        self.sort = SortMode::Unsorted;
        self.filter.clear();
        self.store.add(name);
        self.commit();
        true
    }

    /// Delete the item shown at display row `row`.
    pub fn on_delete_row(&mut self, row: usize) -> bool {
        let Some(name) = self.row_name(row).map(str::to_owned) else {
            tracing::debug!(row, "delete ignored: row no longer displayed");
            return false;
        };
        self.remove_item(&name)
    }

    /// Adjust the inventory of the item shown at display row `row`.
    pub fn on_adjust_row(&mut self, row: usize, delta: i64) -> bool {
        let Some(name) = self.row_name(row).map(str::to_owned) else {
            tracing::debug!(row, "adjust ignored: row no longer displayed");
            return false;
        };
        self.adjust_item(&name, delta)
    }

    /// Remove the first item named `name`. Returns `false` if none matched.
    pub fn remove_item(&mut self, name: &str) -> bool {
        if !self.store.remove(name) {
            return false;
        }
        self.commit();
        true
    }

    /// Adjust the first item named `name` by `delta`, clamped at zero.
    pub fn adjust_item(&mut self, name: &str, delta: i64) -> bool {
        if !self.store.adjust_inventory(name, delta) {
            return false;
        }
        self.commit();
        true
    }

    fn commit(&mut self) {
        // The in-memory store already holds the mutation; a failed save only
        // means disk lags behind until the next successful one.
        self.persisted = self.gateway.save(self.store.items());
        self.recompute();
    }

    fn recompute(&mut self) {
        self.rows = project(self.store.items(), &self.filter, self.sort);
    }
}

//! Lookup history state.
//!
//! Holds the currently displayed result, the bounded history log and the
//! last lookup error. Only the log is persisted.

use std::cell::RefCell;
use std::rc::Rc;

use calorie_common::LookupResult;
use serde::{Deserialize, Serialize};

use crate::storage::PersistedStore;

/// Slot holding the persisted history log.
pub const HISTORY_SLOT: &str = "meal-storage";

/// Maximum number of entries kept in the log.
pub const MAX_HISTORY: usize = 10;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistorySlotRef<'a> {
    meal_history: &'a [LookupResult],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistorySlot {
    #[serde(default)]
    meal_history: Vec<LookupResult>,
}

pub type SharedHistory = Rc<RefCell<LookupHistory>>;

pub struct LookupHistory {
    current: Option<LookupResult>,
    /// Most recent first.
    log: Vec<LookupResult>,
    last_error: Option<String>,
    store: PersistedStore,
}

impl LookupHistory {
    pub fn restore(store: PersistedStore) -> Self {
        let mut log = store
            .load::<HistorySlot>(HISTORY_SLOT)
            .map(|slot| slot.meal_history)
            .unwrap_or_default();
        log.truncate(MAX_HISTORY);

        Self {
            current: None,
            log,
            last_error: None,
            store,
        }
    }

    pub fn shared(store: PersistedStore) -> SharedHistory {
        Rc::new(RefCell::new(Self::restore(store)))
    }

    /// Show `result` as the current one. Clears the last error.
    pub fn set_current_result(&mut self, result: LookupResult) {
        tracing::debug!(
            dish = %result.dish_name,
            total_calories = result.total_calories,
            "Setting current result"
        );
        self.current = Some(result);
        self.last_error = None;
    }

    /// Prepend `result` to the log, evicting the oldest entry when full.
    ///
    /// Entries are not deduplicated.
    pub fn add_to_history(&mut self, result: LookupResult) {
        self.log.insert(0, result);
        self.log.truncate(MAX_HISTORY);
        self.persist();
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Hide the current result. The log is left alone.
    pub fn clear_current_result(&mut self) {
        self.current = None;
    }

    pub fn clear_history(&mut self) {
        self.log.clear();
        self.persist();
    }

    pub fn current_result(&self) -> Option<&LookupResult> {
        self.current.as_ref()
    }

    pub fn entries(&self) -> &[LookupResult] {
        &self.log
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    fn persist(&self) {
        let slot = HistorySlotRef {
            meal_history: &self.log,
        };
        if let Err(e) = self.store.save(HISTORY_SLOT, &slot) {
            tracing::warn!(error = %e, "Failed to persist lookup history");
        }
    }
}

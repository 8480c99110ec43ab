use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::budget::Budget;
use crate::models::category::Category;
use crate::models::settings::Settings;
use crate::models::state::TrackerState;
use crate::models::transaction::Transaction;

use super::store::{KeyValueStore, MemoryStore};

/// Default namespace for the storage slots.
pub const DEFAULT_KEY_PREFIX: &str = "budget_tracker_";

/// Names of the four storage slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub transactions: String,
    pub budgets: String,
    pub categories: String,
    pub settings: String,
}

impl StorageKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            transactions: format!("{prefix}transactions"),
            budgets: format!("{prefix}budgets"),
            categories: format!("{prefix}categories"),
            settings: format!("{prefix}settings"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }
}

/// Typed, failure-tolerant access to the four storage slots.
///
/// Reads never fail: an absent or corrupt slot yields an empty collection
/// (transactions, budgets), the default category list, or default settings.
/// Writes are fire-and-forget: failures are logged and dropped, so the caller's
/// in-memory state can drift from what is persisted.
pub struct StorageManager {
    store: Box<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl std::fmt::Debug for StorageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageManager")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl StorageManager {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    pub fn with_keys(store: Box<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn load_transactions(&self) -> Vec<Transaction> {
        self.load_slot(&self.keys.transactions).unwrap_or_default()
    }

    pub fn load_budgets(&self) -> Vec<Budget> {
        self.load_slot(&self.keys.budgets).unwrap_or_default()
    }

    pub fn load_categories(&self) -> Vec<Category> {
        self.load_slot(&self.keys.categories)
            .unwrap_or_else(Category::defaults)
    }

    pub fn load_settings(&self) -> Settings {
        self.load_slot(&self.keys.settings).unwrap_or_default()
    }

    /// Load all four slots.
    pub fn load_state(&self) -> TrackerState {
        TrackerState {
            transactions: self.load_transactions(),
            budgets: self.load_budgets(),
            categories: self.load_categories(),
            settings: self.load_settings(),
        }
    }

    // ── Writes ──────────────────────────────────────────────────────

    pub fn save_transactions(&mut self, transactions: &[Transaction]) {
        let key = self.keys.transactions.clone();
        self.save_slot(&key, transactions);
    }

    pub fn save_budgets(&mut self, budgets: &[Budget]) {
        let key = self.keys.budgets.clone();
        self.save_slot(&key, budgets);
    }

    pub fn save_categories(&mut self, categories: &[Category]) {
        let key = self.keys.categories.clone();
        self.save_slot(&key, categories);
    }

    pub fn save_settings(&mut self, settings: &Settings) {
        let key = self.keys.settings.clone();
        self.save_slot(&key, settings);
    }

    /// Overwrite all four slots.
    pub fn save_state(&mut self, state: &TrackerState) {
        self.save_transactions(&state.transactions);
        self.save_budgets(&state.budgets);
        self.save_categories(&state.categories);
        self.save_settings(&state.settings);
    }

    // ── Internal ────────────────────────────────────────────────────

    fn load_slot<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key, "storage slot empty, using default");
                return None;
            }
            Err(e) => {
                tracing::error!(key, error = %e, "failed to read storage slot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(key, error = %e, "corrupt storage slot, using default");
                None
            }
        }
    }

    fn save_slot<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to serialize storage slot");
                return;
            }
        };

        if let Err(e) = self.store.set(key, &json) {
            tracing::warn!(key, error = %e, "failed to write storage slot; in-memory state kept");
        }
    }
}

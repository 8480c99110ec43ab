use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::category::Category;
use super::settings::Settings;
use super::state::TrackerState;
use super::transaction::Transaction;

/// Whole-state export. Restoring one replaces all four collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub categories: Vec<Category>,
    pub settings: Settings,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
}

impl BackupSnapshot {
    pub fn capture(state: &TrackerState, timestamp: DateTime<Utc>) -> Self {
        Self {
            transactions: state.transactions.clone(),
            budgets: state.budgets.clone(),
            categories: state.categories.clone(),
            settings: state.settings.clone(),
            timestamp,
        }
    }

    pub fn into_state(self) -> TrackerState {
        TrackerState {
            transactions: self.transactions,
            budgets: self.budgets,
            categories: self.categories,
            settings: self.settings,
        }
    }
}

use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::category::Category;
use super::settings::Settings;
use super::transaction::Transaction;

/// The in-memory data container: the four collections that each map to
/// one storage slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    /// Newest-added first
    pub transactions: Vec<Transaction>,

    /// Registry order (insertion order)
    pub budgets: Vec<Budget>,

    pub categories: Vec<Category>,

    pub settings: Settings,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            budgets: Vec::new(),
            categories: Category::defaults(),
            settings: Settings::default(),
        }
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionType};

/// The slice of a transaction that is shared with an advice provider.
/// Ids and the recurring flag stay local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDigest {
    pub date: NaiveDateTime,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "desc")]
    pub description: String,
}

impl From<&Transaction> for TransactionDigest {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: tx.date,
            transaction_type: tx.transaction_type,
            category: tx.category.clone(),
            amount: tx.amount,
            description: tx.description.clone(),
        }
    }
}

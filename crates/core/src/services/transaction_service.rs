use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::transaction::{NewTransaction, Transaction};

/// Manages the transaction store: append and remove, nothing else.
///
/// Transactions are never edited after creation. The store keeps
/// newest-added first; date order is applied at read time.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a draft, assign it a fresh id and put it at the front of the store.
    pub fn add_transaction(
        &self,
        transactions: &mut Vec<Transaction>,
        draft: NewTransaction,
    ) -> Result<Uuid, CoreError> {
        draft.validate()?;
        let transaction = Transaction::from_draft(draft);
        let id = transaction.id;
        transactions.insert(0, transaction);
        Ok(id)
    }

    /// Validate every draft first; if any fails, none are added (all-or-nothing).
    /// Returns the ids in input order.
    pub fn add_transactions(
        &self,
        transactions: &mut Vec<Transaction>,
        drafts: Vec<NewTransaction>,
    ) -> Result<Vec<Uuid>, CoreError> {
        for draft in &drafts {
            draft.validate()?;
        }
        Ok(drafts
            .into_iter()
            .map(|draft| {
                let transaction = Transaction::from_draft(draft);
                let id = transaction.id;
                transactions.insert(0, transaction);
                id
            })
            .collect())
    }

    /// Remove a transaction by its id and return it.
    pub fn remove_transaction(
        &self,
        transactions: &mut Vec<Transaction>,
        transaction_id: Uuid,
    ) -> Result<Transaction, CoreError> {
        let idx = transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;
        Ok(transactions.remove(idx))
    }

    /// All transactions, newest date first. Equal dates keep store order.
    pub fn sorted_newest_first<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Render transactions as CSV.
    /// Columns: id, date, type, category, description, amount, recurring
    pub fn to_csv(&self, transactions: &[Transaction]) -> String {
        let mut csv = String::from("id,date,type,category,description,amount,recurring\n");
        for tx in transactions {
            csv.push_str(&format!(
                "{},{},{},{},{},{:.2},{}\n",
                tx.id,
                tx.date.format("%Y-%m-%d %H:%M:%S"),
                tx.transaction_type,
                escape_csv(&tx.category),
                escape_csv(&tx.description),
                tx.amount,
                tx.is_recurring,
            ));
        }
        csv
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote fields containing commas, quotes, or line breaks (RFC 4180).
fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Direction of a transaction. The amount itself is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// A single dated income or expense record.
///
/// `category` is a soft reference: it stores the category *name*, not its id.
/// Renaming or deleting a category leaves existing transactions untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned at creation
    pub id: Uuid,

    /// Free-text label
    pub description: String,

    /// Always >= 0; the sign comes from `transaction_type`
    pub amount: f64,

    /// Income or Expense
    pub transaction_type: TransactionType,

    /// Category name as entered
    pub category: String,

    /// When the transaction happened
    pub date: NaiveDateTime,

    /// Informational only, nothing is generated from it
    #[serde(default)]
    pub is_recurring: bool,
}

impl Transaction {
    /// Build a transaction from a validated draft, assigning a fresh id.
    pub fn from_draft(draft: NewTransaction) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: draft.description,
            amount: draft.amount,
            transaction_type: draft.transaction_type,
            category: draft.category,
            date: draft.date,
            is_recurring: draft.is_recurring,
        }
    }

    /// Signed contribution of this transaction to a balance.
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// User input for a new transaction, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category: String,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub is_recurring: bool,
}

impl NewTransaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        transaction_type: TransactionType,
        category: impl Into<String>,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            transaction_type,
            category: category.into(),
            date,
            is_recurring: false,
        }
    }

    /// Convenience for the common expense case.
    pub fn expense(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDateTime,
    ) -> Self {
        Self::new(description, amount, TransactionType::Expense, category, date)
    }

    /// Convenience for the common income case.
    pub fn income(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDateTime,
    ) -> Self {
        Self::new(description, amount, TransactionType::Income, category, date)
    }

    /// Mark the draft as recurring.
    pub fn recurring(mut self) -> Self {
        self.is_recurring = true;
        self
    }

    /// Rules:
    /// - Description and category must be non-blank
    /// - Amount must be a finite number >= 0
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.description.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Transaction description is required".into(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Transaction category is required".into(),
            ));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Transaction amount must be a non-negative number, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

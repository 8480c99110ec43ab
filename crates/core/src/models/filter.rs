use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::transaction::TransactionType;

/// Calendar window a transaction must fall into.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PeriodFilter {
    /// No restriction
    #[default]
    All,
    /// Same calendar month and year as "now"
    ThisMonth,
    /// The calendar month before "now" (January → December of the previous year)
    LastMonth,
    /// Same calendar year as "now"
    ThisYear,
    /// Inclusive `[start 00:00:00, end 23:59:59]`.
    /// Unrestricted unless both bounds are set.
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl PeriodFilter {
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        PeriodFilter::Custom {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// Which transaction types to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn matches(&self, transaction_type: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => transaction_type == TransactionType::Income,
            TypeFilter::Expense => transaction_type == TransactionType::Expense,
        }
    }
}

impl From<TransactionType> for TypeFilter {
    fn from(t: TransactionType) -> Self {
        match t {
            TransactionType::Income => TypeFilter::Income,
            TransactionType::Expense => TypeFilter::Expense,
        }
    }
}

/// Multi-dimensional transaction filter. Every active criterion must match.
///
/// The default filter matches every transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Case-insensitive substring matched against description or category.
    /// Empty matches everything.
    pub search: String,

    pub type_filter: TypeFilter,

    /// Exact category name, or `None` for any category
    pub category: Option<String>,

    pub period: PeriodFilter,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn of_type(mut self, type_filter: impl Into<TypeFilter>) -> Self {
        self.type_filter = type_filter.into();
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn in_period(mut self, period: PeriodFilter) -> Self {
        self.period = period;
        self
    }
}

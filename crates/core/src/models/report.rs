use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Totals over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    /// income - expense; negative when spending exceeds earnings
    pub balance: f64,
}

/// Sum of one category's transactions, for breakdown charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name as stored on the transactions
    pub category: String,
    pub total: f64,
}

/// A calendar month. Orders by year first, so buckets sort across year boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month (1 = January)
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl std::fmt::Display for MonthKey {
    /// Renders as "month/year", e.g. "3/2024".
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Income and expense accumulated within one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub month: MonthKey,
    pub income: f64,
    pub expense: f64,
}

/// End-of-day cumulative balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: f64,
}

use chrono::{Datelike, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};

use crate::models::filter::{PeriodFilter, TransactionFilter};
use crate::models::report::{BalancePoint, CategoryTotal, MonthKey, MonthlyTotals, Summary};
use crate::models::transaction::{Transaction, TransactionType};

/// Derives summaries, breakdowns and filtered views from the transaction list.
///
/// Pure computation: no I/O, no clock. "Now" is always passed in, so every
/// result is deterministic. Every operation is total: empty inputs and
/// unmatched filters produce zeros or empty lists, never errors.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` if `transaction` passes every active criterion of `filter`.
    pub fn matches(
        &self,
        transaction: &Transaction,
        filter: &TransactionFilter,
        now: NaiveDateTime,
    ) -> bool {
        if !filter.search.is_empty() {
            let q = filter.search.to_lowercase();
            let hit = transaction.description.to_lowercase().contains(&q)
                || transaction.category.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }

        if !filter.type_filter.matches(transaction.transaction_type) {
            return false;
        }

        if let Some(category) = &filter.category {
            if &transaction.category != category {
                return false;
            }
        }

        Self::in_period(&filter.period, transaction.date, now)
    }

    /// Transactions matching `filter`, newest first. Equal dates keep their stored order.
    pub fn filter<'a>(
        &self,
        transactions: &'a [Transaction],
        filter: &TransactionFilter,
        now: NaiveDateTime,
    ) -> Vec<&'a Transaction> {
        let mut matched: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| self.matches(t, filter, now))
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        matched
    }

    /// Income, expense and balance over the transactions matching `filter`.
    pub fn summarize(
        &self,
        transactions: &[Transaction],
        filter: &TransactionFilter,
        now: NaiveDateTime,
    ) -> Summary {
        Self::totals(
            transactions
                .iter()
                .filter(|t| self.matches(t, filter, now)),
        )
    }

    /// Per-category totals for one transaction type, largest first.
    ///
    /// Groups by the category name stored on each transaction (no registry lookup).
    /// Ties keep the order in which the categories were first encountered.
    pub fn bucket_by_category(
        &self,
        transactions: &[Transaction],
        transaction_type: TransactionType,
    ) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for tx in transactions
            .iter()
            .filter(|t| t.transaction_type == transaction_type)
        {
            match index.get(tx.category.as_str()) {
                Some(&i) => totals[i].total += tx.amount,
                None => {
                    index.insert(tx.category.as_str(), totals.len());
                    totals.push(CategoryTotal {
                        category: tx.category.clone(),
                        total: tx.amount,
                    });
                }
            }
        }

        // sort_by is stable, so ties stay in first-encountered order
        totals.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        totals
    }

    /// Income and expense per calendar month, oldest month first.
    pub fn bucket_by_month(&self, transactions: &[Transaction]) -> Vec<MonthlyTotals> {
        let mut buckets: BTreeMap<MonthKey, (f64, f64)> = BTreeMap::new();

        for tx in transactions {
            let key = MonthKey::new(tx.date.year(), tx.date.month());
            let (income, expense) = buckets.entry(key).or_insert((0.0, 0.0));
            match tx.transaction_type {
                TransactionType::Income => *income += tx.amount,
                TransactionType::Expense => *expense += tx.amount,
            }
        }

        buckets
            .into_iter()
            .map(|(month, (income, expense))| MonthlyTotals {
                month,
                income,
                expense,
            })
            .collect()
    }

    /// Cumulative balance in chronological order, one point per day that has transactions.
    pub fn running_balance(&self, transactions: &[Transaction]) -> Vec<BalancePoint> {
        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by_key(|t| t.date);

        let mut points: Vec<BalancePoint> = Vec::new();
        let mut balance = 0.0;

        for tx in ordered {
            balance += tx.signed_amount();
            let day = tx.date.date();
            match points.last_mut() {
                Some(last) if last.date == day => last.balance = balance,
                _ => points.push(BalancePoint { date: day, balance }),
            }
        }

        points
    }

    /// Sum income and expense over any iterator of transactions.
    pub fn totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Summary {
        let (income, expense) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expense), tx| match tx.transaction_type {
                    TransactionType::Income => (income + tx.amount, expense),
                    TransactionType::Expense => (income, expense + tx.amount),
                });

        Summary {
            income,
            expense,
            balance: income - expense,
        }
    }

    fn in_period(period: &PeriodFilter, date: NaiveDateTime, now: NaiveDateTime) -> bool {
        match period {
            PeriodFilter::All => true,
            PeriodFilter::ThisMonth => date.year() == now.year() && date.month() == now.month(),
            PeriodFilter::LastMonth => {
                let (year, month) = previous_month(now.year(), now.month());
                date.year() == year && date.month() == month
            }
            PeriodFilter::ThisYear => date.year() == now.year(),
            // Whole days: start 00:00:00 through end 23:59:59
            PeriodFilter::Custom {
                start: Some(start),
                end: Some(end),
            } => {
                let day = date.date();
                day >= *start && day <= *end
            }
            PeriodFilter::Custom { .. } => true,
        }
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}

/// The calendar month before `(year, month)`; January rolls back to December.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

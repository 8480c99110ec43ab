use chrono::Datelike;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::budget::{Budget, BudgetStatus, NewBudget};
use crate::models::transaction::{Transaction, TransactionType};

/// Manages the budget registry and evaluates spending against it.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// Add a budget to the registry.
    ///
    /// Rejects with `DuplicateBudget` (leaving the registry untouched) when a
    /// budget already targets the same category name.
    pub fn add_budget(&self, budgets: &mut Vec<Budget>, draft: NewBudget) -> Result<Uuid, CoreError> {
        draft.validate()?;
        if budgets.iter().any(|b| b.category == draft.category) {
            return Err(CoreError::DuplicateBudget(draft.category));
        }
        let budget = Budget::from_draft(draft);
        let id = budget.id;
        budgets.push(budget);
        Ok(id)
    }

    /// Remove a budget by its id.
    pub fn remove_budget(&self, budgets: &mut Vec<Budget>, budget_id: Uuid) -> Result<Budget, CoreError> {
        let idx = budgets
            .iter()
            .position(|b| b.id == budget_id)
            .ok_or_else(|| CoreError::BudgetNotFound(budget_id.to_string()))?;
        Ok(budgets.remove(idx))
    }

    /// Evaluate every budget against the expenses of one calendar month.
    ///
    /// Output follows registry order. `month` is 1-based.
    pub fn evaluate_budgets(
        &self,
        budgets: &[Budget],
        transactions: &[Transaction],
        month: u32,
        year: i32,
    ) -> Vec<BudgetStatus> {
        budgets
            .iter()
            .map(|budget| {
                let spent: f64 = transactions
                    .iter()
                    .filter(|tx| {
                        tx.transaction_type == TransactionType::Expense
                            && tx.category == budget.category
                            && tx.date.month() == month
                            && tx.date.year() == year
                    })
                    .map(|tx| tx.amount)
                    .sum();
                Self::status(budget, spent)
            })
            .collect()
    }

    /// Build the status of one budget given what was spent.
    ///
    /// - `percentage` is capped at 100; a zero limit saturates to 100 once anything is spent
    /// - `is_over_budget` compares the uncapped values (strictly greater)
    /// - `remaining` never goes below 0
    pub fn status(budget: &Budget, spent: f64) -> BudgetStatus {
        let percentage = if budget.limit > 0.0 {
            (spent / budget.limit * 100.0).min(100.0)
        } else if spent > 0.0 {
            100.0
        } else {
            0.0
        };

        BudgetStatus {
            budget: budget.clone(),
            spent,
            percentage,
            is_over_budget: spent > budget.limit,
            remaining: (budget.limit - spent).max(0.0),
        }
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}

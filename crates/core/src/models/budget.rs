use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// A per-category monthly spending ceiling.
///
/// `category` is matched by name against expense transactions, the same
/// soft reference transactions use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub category: String,
    pub limit: f64,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            limit,
        }
    }

    pub fn from_draft(draft: NewBudget) -> Self {
        Self::new(draft.category, draft.limit)
    }
}

/// User input for a new budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    pub category: String,
    pub limit: f64,
}

impl NewBudget {
    pub fn new(category: impl Into<String>, limit: f64) -> Self {
        Self {
            category: category.into(),
            limit,
        }
    }

    /// Category must be set and the limit must be a finite, non-negative number.
    /// A zero limit is accepted; evaluation treats it as saturated once anything is spent.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.category.trim().is_empty() {
            return Err(CoreError::ValidationError("Budget category is required".into()));
        }
        if !self.limit.is_finite() || self.limit < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Budget limit must be a non-negative number, got {}",
                self.limit
            )));
        }
        Ok(())
    }
}

/// How close a budget is to its ceiling, for progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetLevel {
    /// Below 80% of the limit
    Healthy,
    /// 80% or more, not yet at the limit
    Warning,
    /// At or past the limit
    Exceeded,
}

/// Spending against one budget for a given calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// The evaluated budget
    pub budget: Budget,

    /// Sum of matching expenses in the reference month
    pub spent: f64,

    /// Display percentage, capped at 100
    pub percentage: f64,

    /// `spent > limit`, computed on the uncapped values
    pub is_over_budget: bool,

    /// `limit - spent`, floored at 0
    pub remaining: f64,
}

impl BudgetStatus {
    pub fn level(&self) -> BudgetLevel {
        if self.percentage >= 100.0 {
            BudgetLevel::Exceeded
        } else if self.percentage >= 80.0 {
            BudgetLevel::Warning
        } else {
            BudgetLevel::Healthy
        }
    }
}

use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::category::{Category, NewCategory};
use crate::models::transaction::TransactionType;

/// Manages the category registry.
///
/// Transactions and budgets point at categories by name only, so nothing here
/// cascades: renaming or deleting a category leaves old records pointing at a
/// name that may no longer resolve.
pub struct CategoryService;

impl CategoryService {
    pub fn new() -> Self {
        Self
    }

    pub fn add_category(
        &self,
        categories: &mut Vec<Category>,
        draft: NewCategory,
    ) -> Result<Uuid, CoreError> {
        draft.validate()?;
        let category = Category::from_draft(draft);
        let id = category.id;
        categories.push(category);
        Ok(id)
    }

    /// Replace a category's fields in place, keeping its id and position.
    pub fn update_category(
        &self,
        categories: &mut [Category],
        category_id: Uuid,
        draft: NewCategory,
    ) -> Result<(), CoreError> {
        draft.validate()?;
        let category = categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| CoreError::CategoryNotFound(category_id.to_string()))?;

        category.name = draft.name;
        category.kind = draft.kind;
        category.icon = draft.icon;
        category.color = draft.color;
        Ok(())
    }

    pub fn remove_category(
        &self,
        categories: &mut Vec<Category>,
        category_id: Uuid,
    ) -> Result<Category, CoreError> {
        let idx = categories
            .iter()
            .position(|c| c.id == category_id)
            .ok_or_else(|| CoreError::CategoryNotFound(category_id.to_string()))?;
        Ok(categories.remove(idx))
    }

    /// Categories usable for a transaction type (its own kind plus `Both`).
    pub fn categories_for<'a>(
        &self,
        categories: &'a [Category],
        transaction_type: TransactionType,
    ) -> Vec<&'a Category> {
        categories
            .iter()
            .filter(|c| c.kind.applies_to(transaction_type))
            .collect()
    }

    /// Display join: find the category a stored name refers to.
    /// `None` for dangling names; callers show a generic placeholder.
    pub fn resolve<'a>(&self, categories: &'a [Category], name: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.name == name)
    }
}

impl Default for CategoryService {
    fn default() -> Self {
        Self::new()
    }
}

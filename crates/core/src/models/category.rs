use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

use super::transaction::TransactionType;

/// Which transaction types a category can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Both,
}

impl CategoryKind {
    /// `Both` applies to every transaction type.
    pub fn applies_to(&self, transaction_type: TransactionType) -> bool {
        matches!(
            (self, transaction_type),
            (CategoryKind::Both, _)
                | (CategoryKind::Income, TransactionType::Income)
                | (CategoryKind::Expense, TransactionType::Expense)
        )
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryKind::Income => write!(f, "income"),
            CategoryKind::Expense => write!(f, "expense"),
            CategoryKind::Both => write!(f, "both"),
        }
    }
}

/// The fixed icon set a category can point into.
///
/// Unknown names (e.g. from an older or hand-edited store) fall back to `MoreHorizontal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryIcon {
    Briefcase,
    Laptop,
    TrendingUp,
    Gift,
    Utensils,
    Home,
    Car,
    Smile,
    Heart,
    GraduationCap,
    ShoppingBag,
    Zap,
    Wifi,
    Smartphone,
    Coffee,
    Music,
    Plane,
    Gamepad,
    Dumbbell,
    Stethoscope,
    Book,
    Hammer,
    Dog,
    #[default]
    #[serde(other)]
    MoreHorizontal,
}

impl CategoryIcon {
    pub const ALL: [CategoryIcon; 24] = [
        CategoryIcon::Briefcase,
        CategoryIcon::Laptop,
        CategoryIcon::TrendingUp,
        CategoryIcon::Gift,
        CategoryIcon::Utensils,
        CategoryIcon::Home,
        CategoryIcon::Car,
        CategoryIcon::Smile,
        CategoryIcon::Heart,
        CategoryIcon::GraduationCap,
        CategoryIcon::ShoppingBag,
        CategoryIcon::MoreHorizontal,
        CategoryIcon::Zap,
        CategoryIcon::Wifi,
        CategoryIcon::Smartphone,
        CategoryIcon::Coffee,
        CategoryIcon::Music,
        CategoryIcon::Plane,
        CategoryIcon::Gamepad,
        CategoryIcon::Dumbbell,
        CategoryIcon::Stethoscope,
        CategoryIcon::Book,
        CategoryIcon::Hammer,
        CategoryIcon::Dog,
    ];
}

/// A named, typed classification tag with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: Uuid,

    /// Display name, also the matching key used by transactions and budgets
    pub name: String,

    /// Income, Expense or Both
    pub kind: CategoryKind,

    /// Symbolic icon reference
    #[serde(default)]
    pub icon: CategoryIcon,

    /// Symbolic style reference (e.g. "bg-emerald-500")
    pub color: String,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        kind: CategoryKind,
        icon: CategoryIcon,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            icon,
            color: color.into(),
        }
    }

    pub fn from_draft(draft: NewCategory) -> Self {
        Self::new(draft.name, draft.kind, draft.icon, draft.color)
    }

    /// The built-in list used when no categories have been stored yet.
    ///
    /// Ids are fixed (1 through 12) so the same built-in category keeps its id
    /// across reloads until the list is first persisted.
    pub fn defaults() -> Vec<Category> {
        use CategoryIcon::*;
        use CategoryKind::*;

        [
            ("Salary", Income, Briefcase, "bg-emerald-500"),
            ("Freelance", Income, Laptop, "bg-blue-500"),
            ("Investments", Income, TrendingUp, "bg-indigo-500"),
            ("Gifts", Income, Gift, "bg-pink-500"),
            ("Food", Expense, Utensils, "bg-orange-500"),
            ("Housing", Expense, Home, "bg-amber-600"),
            ("Transport", Expense, Car, "bg-sky-500"),
            ("Leisure", Expense, Smile, "bg-purple-500"),
            ("Health", Expense, Heart, "bg-red-500"),
            ("Education", Expense, GraduationCap, "bg-teal-500"),
            ("Shopping", Expense, ShoppingBag, "bg-fuchsia-500"),
            ("Other", Both, MoreHorizontal, "bg-gray-500"),
        ]
        .into_iter()
        .zip(1u128..)
        .map(|((name, kind, icon, color), n)| Category {
            id: Uuid::from_u128(n),
            name: name.to_string(),
            kind,
            icon,
            color: color.to_string(),
        })
        .collect()
    }
}

/// User input for creating or editing a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub kind: CategoryKind,
    pub icon: CategoryIcon,
    pub color: String,
}

impl NewCategory {
    /// A draft with the form's defaults: generic icon, gray color.
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            icon: CategoryIcon::MoreHorizontal,
            color: "bg-gray-500".to_string(),
        }
    }

    pub fn with_icon(mut self, icon: CategoryIcon) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Category name is required".into()));
        }
        if self.color.trim().is_empty() {
            return Err(CoreError::ValidationError("Category color is required".into()));
        }
        Ok(())
    }
}

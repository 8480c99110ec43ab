// ═══════════════════════════════════════════════════════════════════
// Model Tests — drafts, validation, defaults, serde shapes
// ═══════════════════════════════════════════════════════════════════

use budget_tracker_core::errors::CoreError;
use budget_tracker_core::models::budget::{Budget, BudgetLevel, BudgetStatus, NewBudget};
use budget_tracker_core::models::category::{Category, CategoryIcon, CategoryKind, NewCategory};
use budget_tracker_core::models::filter::{PeriodFilter, TransactionFilter, TypeFilter};
use budget_tracker_core::models::report::MonthKey;
use budget_tracker_core::models::settings::{Currency, Language, Settings, Theme};
use budget_tracker_core::models::state::TrackerState;
use budget_tracker_core::models::transaction::{NewTransaction, Transaction, TransactionType};
use chrono::{NaiveDate, NaiveDateTime};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Transactions
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn valid_draft_passes() {
        let draft = NewTransaction::expense("Groceries", 42.5, "Food", at(2024, 3, 5));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn zero_amount_is_allowed() {
        let draft = NewTransaction::income("Placeholder", 0.0, "Other", at(2024, 3, 5));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn blank_description_rejected() {
        let draft = NewTransaction::expense("   ", 10.0, "Food", at(2024, 3, 5));
        assert!(matches!(draft.validate(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn blank_category_rejected() {
        let draft = NewTransaction::expense("Lunch", 10.0, "", at(2024, 3, 5));
        assert!(matches!(draft.validate(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn negative_amount_rejected() {
        let draft = NewTransaction::expense("Refund", -5.0, "Food", at(2024, 3, 5));
        assert!(matches!(draft.validate(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn non_finite_amount_rejected() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let draft = NewTransaction::expense("Broken", amount, "Food", at(2024, 3, 5));
            assert!(draft.validate().is_err(), "{amount} should be rejected");
        }
    }

    #[test]
    fn from_draft_assigns_unique_ids() {
        let draft = NewTransaction::expense("Coffee", 3.5, "Food", at(2024, 3, 5));
        let a = Transaction::from_draft(draft.clone());
        let b = Transaction::from_draft(draft);
        assert_ne!(a.id, b.id);
        assert_eq!(a.description, "Coffee");
        assert_eq!(a.transaction_type, TransactionType::Expense);
        assert!(!a.is_recurring);
    }

    #[test]
    fn recurring_flag_is_carried() {
        let draft = NewTransaction::expense("Rent", 1000.0, "Housing", at(2024, 3, 1)).recurring();
        assert!(Transaction::from_draft(draft).is_recurring);
    }

    #[test]
    fn signed_amount_follows_type() {
        let income = Transaction::from_draft(NewTransaction::income("Pay", 100.0, "Salary", at(2024, 1, 1)));
        let expense = Transaction::from_draft(NewTransaction::expense("Bus", 2.5, "Transport", at(2024, 1, 1)));
        assert_eq!(income.signed_amount(), 100.0);
        assert_eq!(expense.signed_amount(), -2.5);
    }

    #[test]
    fn type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TransactionType::Income).unwrap(), "\"income\"");
        assert_eq!(serde_json::to_string(&TransactionType::Expense).unwrap(), "\"expense\"");
        assert_eq!(TransactionType::Expense.to_string(), "expense");
    }

    #[test]
    fn missing_recurring_flag_defaults_to_false() {
        let json = r#"{
            "id": "5f0c8a5e-2b8f-4a4b-9c33-0c1f2d3e4f50",
            "description": "Lunch",
            "amount": 12.0,
            "transaction_type": "expense",
            "category": "Food",
            "date": "2024-03-05T12:00:00"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert!(!tx.is_recurring);
        assert_eq!(tx.date, at(2024, 3, 5));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Categories
// ═══════════════════════════════════════════════════════════════════

mod category {
    use super::*;

    #[test]
    fn kind_applies_to_types() {
        assert!(CategoryKind::Income.applies_to(TransactionType::Income));
        assert!(!CategoryKind::Income.applies_to(TransactionType::Expense));
        assert!(CategoryKind::Expense.applies_to(TransactionType::Expense));
        assert!(!CategoryKind::Expense.applies_to(TransactionType::Income));
        assert!(CategoryKind::Both.applies_to(TransactionType::Income));
        assert!(CategoryKind::Both.applies_to(TransactionType::Expense));
    }

    #[test]
    fn defaults_cover_both_types() {
        let defaults = Category::defaults();
        assert_eq!(defaults.len(), 12);
        assert!(defaults.iter().any(|c| c.name == "Salary" && c.kind == CategoryKind::Income));
        assert!(defaults.iter().any(|c| c.name == "Food" && c.kind == CategoryKind::Expense));
        assert!(defaults.iter().any(|c| c.name == "Other" && c.kind == CategoryKind::Both));
    }

    #[test]
    fn default_names_are_unique() {
        let defaults = Category::defaults();
        let mut names: Vec<&str> = defaults.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), defaults.len());
    }

    #[test]
    fn draft_defaults_to_generic_icon() {
        let draft = NewCategory::new("Pets", CategoryKind::Expense);
        assert_eq!(draft.icon, CategoryIcon::MoreHorizontal);
        assert_eq!(draft.color, "bg-gray-500");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_builders() {
        let draft = NewCategory::new("Pets", CategoryKind::Expense)
            .with_icon(CategoryIcon::Dog)
            .with_color("bg-lime-500");
        let category = Category::from_draft(draft);
        assert_eq!(category.icon, CategoryIcon::Dog);
        assert_eq!(category.color, "bg-lime-500");
    }

    #[test]
    fn blank_name_rejected() {
        let draft = NewCategory::new(" ", CategoryKind::Both);
        assert!(matches!(draft.validate(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn blank_color_rejected() {
        let draft = NewCategory::new("Pets", CategoryKind::Expense).with_color("");
        assert!(draft.validate().is_err());
    }

    #[test]
    fn icon_set_has_24_distinct_entries() {
        let mut icons = CategoryIcon::ALL.to_vec();
        icons.dedup();
        assert_eq!(icons.len(), 24);
    }

    #[test]
    fn every_icon_keeps_its_name() {
        for icon in CategoryIcon::ALL {
            let json = serde_json::to_string(&icon).unwrap();
            let back: CategoryIcon = serde_json::from_str(&json).unwrap();
            assert_eq!(back, icon, "{json}");
        }
        assert_eq!(serde_json::to_string(&CategoryIcon::Dog).unwrap(), "\"Dog\"");
    }

    #[test]
    fn default_ids_are_stable() {
        let first: Vec<_> = Category::defaults().into_iter().map(|c| c.id).collect();
        let second: Vec<_> = Category::defaults().into_iter().map(|c| c.id).collect();
        assert_eq!(first, second);

        let mut unique = first.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), first.len());
    }

    #[test]
    fn unknown_icon_falls_back() {
        let icon: CategoryIcon = serde_json::from_str("\"Spaceship\"").unwrap();
        assert_eq!(icon, CategoryIcon::MoreHorizontal);
    }

    #[test]
    fn missing_icon_falls_back() {
        let json = r#"{
            "id": "5f0c8a5e-2b8f-4a4b-9c33-0c1f2d3e4f51",
            "name": "Pets",
            "kind": "expense",
            "color": "bg-lime-500"
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.icon, CategoryIcon::MoreHorizontal);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Budgets
// ═══════════════════════════════════════════════════════════════════

mod budget {
    use super::*;

    fn status(percentage: f64) -> BudgetStatus {
        BudgetStatus {
            budget: Budget::new("Food", 100.0),
            spent: percentage,
            percentage,
            is_over_budget: percentage > 100.0,
            remaining: (100.0 - percentage).max(0.0),
        }
    }

    #[test]
    fn zero_limit_is_valid() {
        assert!(NewBudget::new("Food", 0.0).validate().is_ok());
    }

    #[test]
    fn negative_limit_rejected() {
        assert!(matches!(
            NewBudget::new("Food", -1.0).validate(),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn blank_category_rejected() {
        assert!(NewBudget::new("", 100.0).validate().is_err());
    }

    #[test]
    fn from_draft_keeps_fields() {
        let budget = Budget::from_draft(NewBudget::new("Leisure", 250.0));
        assert_eq!(budget.category, "Leisure");
        assert_eq!(budget.limit, 250.0);
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(status(0.0).level(), BudgetLevel::Healthy);
        assert_eq!(status(79.5).level(), BudgetLevel::Healthy);
        assert_eq!(status(80.0).level(), BudgetLevel::Warning);
        assert_eq!(status(99.0).level(), BudgetLevel::Warning);
        assert_eq!(status(100.0).level(), BudgetLevel::Exceeded);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.language, Language::Pt);
        assert_eq!(s.currency, Currency::Brl);
        assert_eq!(s.theme, Theme::Light);
        assert!(!s.is_pro);
        assert!(!s.has_pin_protection());
        assert!(s.last_backup_date.is_none());
        assert!(s.api_keys.is_empty());
    }

    #[test]
    fn currency_codes_and_symbols() {
        assert_eq!(Currency::Brl.symbol(), "R$");
        assert_eq!(Currency::Usd.symbol(), "$");
        assert_eq!(Currency::Eur.symbol(), "€");
        assert_eq!(Currency::Eur.to_string(), "EUR");
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
    }

    #[test]
    fn language_codes() {
        let codes: Vec<&str> = [Language::Pt, Language::En, Language::Es, Language::Fr]
            .iter()
            .map(|l| l.code())
            .collect();
        assert_eq!(codes, vec!["pt", "en", "es", "fr"]);
        assert_eq!(serde_json::to_string(&Language::Fr).unwrap(), "\"fr\"");
    }

    #[test]
    fn partial_record_merges_over_defaults() {
        let s: Settings = serde_json::from_str(r#"{"language":"en"}"#).unwrap();
        assert_eq!(s.language, Language::En);
        assert_eq!(s.currency, Currency::Brl);
        assert_eq!(s.theme, Theme::Light);
    }

    #[test]
    fn empty_record_is_default() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, Settings::default());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Filters, reports, state
// ═══════════════════════════════════════════════════════════════════

mod filter {
    use super::*;

    #[test]
    fn default_filter_is_unrestricted() {
        let f = TransactionFilter::default();
        assert!(f.search.is_empty());
        assert_eq!(f.type_filter, TypeFilter::All);
        assert!(f.category.is_none());
        assert_eq!(f.period, PeriodFilter::All);
    }

    #[test]
    fn builders_compose() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let f = TransactionFilter::new()
            .search("coffee")
            .of_type(TransactionType::Expense)
            .in_category("Food")
            .in_period(PeriodFilter::custom(start, end));
        assert_eq!(f.search, "coffee");
        assert_eq!(f.type_filter, TypeFilter::Expense);
        assert_eq!(f.category.as_deref(), Some("Food"));
        assert_eq!(
            f.period,
            PeriodFilter::Custom {
                start: Some(start),
                end: Some(end)
            }
        );
    }

    #[test]
    fn type_filter_matches() {
        assert!(TypeFilter::All.matches(TransactionType::Income));
        assert!(TypeFilter::Income.matches(TransactionType::Income));
        assert!(!TypeFilter::Income.matches(TransactionType::Expense));
    }
}

mod report {
    use super::*;

    #[test]
    fn month_key_orders_across_years() {
        assert!(MonthKey::new(2023, 12) < MonthKey::new(2024, 1));
        assert!(MonthKey::new(2024, 2) < MonthKey::new(2024, 11));
    }

    #[test]
    fn month_key_display() {
        assert_eq!(MonthKey::new(2024, 3).to_string(), "3/2024");
    }
}

mod state {
    use super::*;

    #[test]
    fn default_state_seeds_categories() {
        let state = TrackerState::default();
        assert!(state.transactions.is_empty());
        assert!(state.budgets.is_empty());
        assert_eq!(state.categories.len(), Category::defaults().len());
    }
}

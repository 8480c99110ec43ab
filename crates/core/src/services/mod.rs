pub mod advice_service;
pub mod aggregation_service;
pub mod budget_service;
pub mod category_service;
pub mod format_service;
pub mod transaction_service;

pub mod advice;
pub mod backup;
pub mod budget;
pub mod category;
pub mod filter;
pub mod report;
pub mod settings;
pub mod state;
pub mod transaction;

use crate::models::settings::{Language, Settings};
use crate::models::transaction::TransactionType;

/// Locale-aware money formatting. Settings are passed in explicitly on every call.
pub struct FormatService;

impl FormatService {
    pub fn new() -> Self {
        Self
    }

    /// Two decimals with the language's grouping, e.g. "1,234.56" (en) or "1.234,56" (pt).
    pub fn format_number(&self, value: f64, language: Language) -> String {
        let (group, decimal) = match language {
            Language::En => (',', '.'),
            Language::Pt | Language::Es => ('.', ','),
            Language::Fr => (' ', ','),
        };

        let cents = (value.abs() * 100.0).round() as u64;
        let whole = (cents / 100).to_string();
        let fraction = cents % 100;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(group);
            }
            grouped.push(ch);
        }

        // no "-0,00" for values that round to zero
        let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
        format!("{sign}{grouped}{decimal}{fraction:02}")
    }

    /// Currency symbol plus formatted number, e.g. "R$ 1.234,56".
    pub fn format_money(&self, value: f64, settings: &Settings) -> String {
        format!(
            "{} {}",
            settings.currency.symbol(),
            self.format_number(value, settings.language)
        )
    }

    /// Amount with the sign implied by its type, e.g. "- R$ 40,00".
    pub fn format_signed(
        &self,
        amount: f64,
        transaction_type: TransactionType,
        settings: &Settings,
    ) -> String {
        let sign = match transaction_type {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        };
        format!("{sign} {}", self.format_money(amount.abs(), settings))
    }
}

impl Default for FormatService {
    fn default() -> Self {
        Self::new()
    }
}

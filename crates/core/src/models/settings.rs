use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::security::pin::PinLock;

/// Interface language. Drives number formatting and the language advice is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
    Es,
    Fr,
}

impl Language {
    /// ISO 639-1 code (e.g., "pt").
    pub fn code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Display currency. Amounts are never converted between currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
    Eur,
}

impl Currency {
    /// ISO 4217 code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Brl => "R$",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// User-configurable settings, stored in their own storage slot.
///
/// Fields missing from a stored record take their default value, so older
/// records keep loading as new settings are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Language,

    pub currency: Currency,

    /// Premium features unlocked
    pub is_pro: bool,

    /// PIN gate; `None` when the app is not protected.
    pub pin: Option<PinLock>,

    pub theme: Theme,

    /// When the last backup snapshot was exported
    pub last_backup_date: Option<DateTime<Utc>>,

    /// Optional API keys for advice providers.
    /// Keys: provider name (e.g., "gemini"). Values: the API key string.
    pub api_keys: HashMap<String, String>,
}

impl Settings {
    pub fn has_pin_protection(&self) -> bool {
        self.pin.is_some()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            currency: Currency::default(),
            is_pro: false,
            pin: None,
            theme: Theme::default(),
            last_backup_date: None,
            api_keys: HashMap::new(),
        }
    }
}

use std::collections::HashMap;

use super::gemini::GeminiProvider;
use super::traits::AdviceProvider;

/// Settings key under which the Gemini API key is stored.
pub const GEMINI_KEY: &str = "gemini";

/// Registry of configured advice providers, tried in registration order.
pub struct AdviceProviderRegistry {
    providers: Vec<Box<dyn AdviceProvider>>,
}

impl AdviceProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with every provider whose API key is present.
    pub fn new_with_defaults(api_keys: &HashMap<String, String>) -> Self {
        let mut registry = Self::new();

        // Gemini: needs an API key
        if let Some(key) = api_keys.get(GEMINI_KEY).filter(|k| !k.trim().is_empty()) {
            registry.register(Box::new(GeminiProvider::new(key.clone())));
        }

        registry
    }

    pub fn register(&mut self, provider: Box<dyn AdviceProvider>) {
        self.providers.push(provider);
    }

    /// All providers, in registration (fallback) order.
    pub fn providers(&self) -> Vec<&dyn AdviceProvider> {
        self.providers.iter().map(|p| p.as_ref()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }
}

impl Default for AdviceProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use crate::errors::CoreError;
use crate::models::advice::TransactionDigest;
use crate::models::settings::{Currency, Language};
use crate::models::transaction::Transaction;
use crate::providers::registry::AdviceProviderRegistry;
use crate::providers::traits::AdviceProvider;

/// Most transactions ever shared with an advice provider.
pub const DIGEST_LIMIT: usize = 50;

/// Requests generated advice from the configured providers.
///
/// Tries providers in registration order and falls back to the next one on
/// failure. Whatever goes wrong, callers see a single `AdviceUnavailable`.
pub struct AdviceService {
    registry: AdviceProviderRegistry,
}

impl AdviceService {
    pub fn new(registry: AdviceProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn has_provider(&self) -> bool {
        !self.registry.is_empty()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Append a provider to the end of the fallback order.
    pub fn register(&mut self, provider: Box<dyn AdviceProvider>) {
        self.registry.register(provider);
    }

    /// The most recent transactions by date (newest first), capped at [`DIGEST_LIMIT`].
    pub fn digest(transactions: &[Transaction]) -> Vec<TransactionDigest> {
        let mut recent: Vec<&Transaction> = transactions.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent
            .into_iter()
            .take(DIGEST_LIMIT)
            .map(TransactionDigest::from)
            .collect()
    }

    pub async fn generate(
        &self,
        transactions: &[Transaction],
        currency: Currency,
        language: Language,
    ) -> Result<String, CoreError> {
        let providers = self.registry.providers();
        if providers.is_empty() {
            return Err(CoreError::AdviceUnavailable(
                "no advice provider configured".into(),
            ));
        }

        let digest = Self::digest(transactions);
        let mut last_error = None;

        for provider in &providers {
            match provider.generate_advice(&digest, currency, language).await {
                Ok(text) if !text.trim().is_empty() => return Ok(text),
                Ok(_) => {
                    tracing::warn!(provider = provider.name(), "advice provider returned empty text");
                    last_error = Some(format!("{} returned no text", provider.name()));
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "advice provider failed");
                    last_error = Some(e.to_string());
                }
            }
        }

        Err(CoreError::AdviceUnavailable(
            last_error.unwrap_or_else(|| "no advice provider configured".into()),
        ))
    }
}

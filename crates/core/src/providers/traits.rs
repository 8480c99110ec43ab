use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::advice::TransactionDigest;
use crate::models::settings::{Currency, Language};

/// Trait abstraction for generative advice services.
///
/// The aggregation core never waits on this; only the advice feature does.
/// Swapping services means adding one implementation and registering it.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AdviceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Produce prose advice for a digest of recent transactions
    /// (newest first, already capped), written in `language` with amounts in `currency`.
    async fn generate_advice(
        &self,
        digest: &[TransactionDigest],
        currency: Currency,
        language: Language,
    ) -> Result<String, CoreError>;
}

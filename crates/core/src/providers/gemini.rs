use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::advice::TransactionDigest;
use crate::models::settings::{Currency, Language};
use super::traits::AdviceProvider;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const PROVIDER_NAME: &str = "Gemini";

/// Google Gemini `generateContent` provider.
///
/// - **Auth**: API key, sent in the `x-goog-api-key` header.
/// - **Endpoint**: `POST /models/{model}:generateContent`
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(60));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at a different host (proxies, local test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// The instruction sent to the model: an advisor persona, the transactions
    /// as JSON, and the currency and language to answer in.
    pub fn build_prompt(
        digest: &[TransactionDigest],
        currency: Currency,
        language: Language,
    ) -> Result<String, CoreError> {
        let transactions = serde_json::to_string(digest).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize transaction digest: {e}"))
        })?;

        Ok(format!(
            "Act as a friendly personal financial advisor.\n\
             Analyze the following recent transactions (JSON format), provide insights, \
             identify spending patterns, and give 3 concrete tips to save money.\n\
             \n\
             The user's currency is {currency}.\n\
             Answer exclusively in the language code: \"{language}\".\n\
             \n\
             Transactions:\n\
             {transactions}\n\
             \n\
             If there are no transactions, give general financial advice for beginners.\n\
             Keep the tone friendly, encouraging, and professional.\n\
             Format with clear headings and bullet points using Markdown.\n",
            currency = currency.code(),
            language = language.code(),
        ))
    }

    /// Pull the generated text out of a `generateContent` response body.
    /// Concatenates every text part of the first candidate.
    pub fn parse_response(body: &str) -> Result<String, CoreError> {
        let resp: GenerateContentResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse response: {e}"),
        })?;

        let text: String = resp
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: "Response contained no text".into(),
            });
        }
        Ok(text)
    }
}

// ── Gemini API request / response types ─────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AdviceProvider for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn generate_advice(
        &self,
        digest: &[TransactionDigest],
        currency: Currency,
        language: Language,
    ) -> Result<String, CoreError> {
        let prompt = Self::build_prompt(digest, currency, language)?;
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("HTTP {status}"),
            });
        }

        Self::parse_response(&text)
    }
}

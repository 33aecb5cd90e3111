//! HTTP client for a remote capability service.
//!
//! Every capability is a `POST {base}/v1/<endpoint>` with a JSON body and a
//! JSON answer. A top-level `"error"` string in the answer is surfaced as
//! [`AiError::Api`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use snaplist_core::{ImageAsset, ListingContent, ProductFacts, Tone, ToneVariant};

use crate::error::AiError;
use crate::provider::{CapabilityProvider, VoiceSummary};

#[derive(Debug, Deserialize)]
struct TextResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct TonesResponse {
    variants: Vec<ToneVariant>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FactsRequest<'a> {
    images: &'a [ImageAsset],
    #[serde(skip_serializing_if = "Option::is_none")]
    transcript: Option<&'a str>,
}

/// Capability provider backed by a remote HTTP service.
///
/// Use [`LiveProvider::with_base_url`] for both production and wiremock tests.
pub struct LiveProvider {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl LiveProvider {
    /// Creates a provider for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed, or [`AiError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends below the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| AiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.map(str::to_owned),
            base_url,
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, AiError> {
        self.base_url
            .join(&format!("v1/{endpoint}"))
            .map_err(|e| AiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Posts `body` to `endpoint`, asserts a 2xx status, checks for an
    /// `"error"` payload and decodes the answer into `T`.
    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, AiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint)?;
        let mut request = self.client.post(url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let text = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| AiError::Deserialize {
                context: endpoint.to_owned(),
                source: e,
            })?;

        if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
            return Err(AiError::Api(format!("{endpoint}: {message}")));
        }

        serde_json::from_value(value).map_err(|e| AiError::Deserialize {
            context: endpoint.to_owned(),
            source: e,
        })
    }
}

/// Orders variants by tone and rejects answers that miss or repeat a tone.
fn check_variants(mut variants: Vec<ToneVariant>) -> Result<Vec<ToneVariant>, AiError> {
    for tone in Tone::ALL {
        let matches = variants.iter().filter(|v| v.tone == tone).count();
        if matches != 1 {
            return Err(AiError::Api(format!(
                "tones: expected exactly one {tone} variant, got {matches}"
            )));
        }
    }
    variants.sort_by_key(|v| Tone::ALL.iter().position(|t| *t == v.tone));
    Ok(variants)
}

#[async_trait]
impl CapabilityProvider for LiveProvider {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn extract_facts(
        &self,
        images: &[ImageAsset],
        transcript: Option<&str>,
    ) -> Result<ProductFacts, AiError> {
        self.post("facts", &FactsRequest { images, transcript })
            .await
    }

    async fn write_listing(&self, facts: &ProductFacts) -> Result<ListingContent, AiError> {
        self.post("listing", &json!({ "facts": facts })).await
    }

    async fn rewrite_tones(&self, content: &ListingContent) -> Result<Vec<ToneVariant>, AiError> {
        let response: TonesResponse = self.post("tones", &json!({ "content": content })).await?;
        check_variants(response.variants)
    }

    async fn proofread(&self, text: &str) -> Result<String, AiError> {
        let response: TextResponse = self.post("proofread", &json!({ "text": text })).await?;
        Ok(response.text)
    }

    async fn translate(&self, text: &str, language: &str) -> Result<String, AiError> {
        let response: TextResponse = self
            .post("translate", &json!({ "text": text, "language": language }))
            .await?;
        Ok(response.text)
    }

    async fn summarize_voice(
        &self,
        transcript: &str,
        facts: &ProductFacts,
    ) -> Result<VoiceSummary, AiError> {
        self.post(
            "summarize",
            &json!({ "transcript": transcript, "facts": facts }),
        )
        .await
    }
}

//! The capability boundary the generator calls through.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snaplist_core::{AppConfig, ImageAsset, ListingContent, ProductFacts, ToneVariant, VideoScript};

use crate::error::AiError;
use crate::fallback::FallbackProvider;
use crate::live::LiveProvider;

/// Result of summarizing a voice transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSummary {
    pub summary: String,
    pub video_script: VideoScript,
}

/// AI text/vision capabilities used to build a listing.
///
/// Implementations may be unavailable at any time; the pipeline substitutes
/// [`FallbackProvider`] output for any step that fails.
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Provider identifier used in logs (e.g. `"live"`, `"fallback"`).
    fn name(&self) -> &'static str;

    /// Extract structured product facts from photos and an optional transcript.
    async fn extract_facts(
        &self,
        images: &[ImageAsset],
        transcript: Option<&str>,
    ) -> Result<ProductFacts, AiError>;

    /// Write title, description, keywords and optionally a price.
    async fn write_listing(&self, facts: &ProductFacts) -> Result<ListingContent, AiError>;

    /// Rewrite the content once per tone (friendly, premium, bargain).
    async fn rewrite_tones(&self, content: &ListingContent) -> Result<Vec<ToneVariant>, AiError>;

    /// Grammar-correct a piece of text.
    async fn proofread(&self, text: &str) -> Result<String, AiError>;

    /// Translate `text` into the language identified by `language` (e.g. `"es"`).
    async fn translate(&self, text: &str, language: &str) -> Result<String, AiError>;

    /// Summarize a voice transcript and turn it into a short video script.
    async fn summarize_voice(
        &self,
        transcript: &str,
        facts: &ProductFacts,
    ) -> Result<VoiceSummary, AiError>;
}

/// Pick the provider once at startup: live when a base URL is configured,
/// otherwise the local fallback.
///
/// # Errors
///
/// Returns [`AiError`] if the live provider cannot be constructed.
pub fn select_provider(config: &AppConfig) -> Result<Box<dyn CapabilityProvider>, AiError> {
    match config.ai_base_url.as_deref() {
        Some(base_url) => {
            let provider = LiveProvider::with_base_url(
                base_url,
                config.ai_api_key.as_deref(),
                config.ai_timeout_secs,
                &config.ai_user_agent,
            )?;
            tracing::info!(base_url, "using live capability provider");
            Ok(Box::new(provider))
        }
        None => {
            tracing::info!("no AI base URL configured; using fallback provider");
            Ok(Box::new(FallbackProvider))
        }
    }
}

//! Listing generation pipeline.
//!
//! Each capability call goes through the configured provider. A failed step
//! is logged and replaced by [`FallbackProvider`] output for that step only,
//! so a flaky service degrades the listing instead of aborting it.

use snaplist_core::{
    generate_listing_id, normalize_keywords, now_millis, ImageAsset, Listing, ListingContent,
    PriceTable, ProductFacts, ToneVariant, VideoScript, VoiceNote,
};

use crate::error::AiError;
use crate::fallback::FallbackProvider;
use crate::provider::CapabilityProvider;

/// Inputs for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub images: Vec<ImageAsset>,
    pub voice_note: Option<VoiceNote>,
    /// Target language code; `None` or `"en"` skips translation.
    pub language: Option<String>,
}

/// Everything a run produces apart from identity and timestamps.
struct Generated {
    content: ListingContent,
    facts: ProductFacts,
    variants: Vec<ToneVariant>,
    video_script: Option<VideoScript>,
    language: Option<String>,
}

/// Runs the generation steps against one provider.
pub struct Generator<'a> {
    provider: &'a dyn CapabilityProvider,
    prices: &'a PriceTable,
    max_images: usize,
}

impl<'a> Generator<'a> {
    #[must_use]
    pub fn new(
        provider: &'a dyn CapabilityProvider,
        prices: &'a PriceTable,
        max_images: usize,
    ) -> Self {
        Self {
            provider,
            prices,
            max_images,
        }
    }

    /// Build a new listing from photos and an optional voice note.
    ///
    /// The result has a fresh id and `created_at == updated_at`. It is not
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::InvalidRequest`] when there are no images or more
    /// than the configured maximum. Provider failures never surface here.
    pub async fn generate_listing(&self, request: GenerationRequest) -> Result<Listing, AiError> {
        let GenerationRequest {
            images,
            voice_note,
            language,
        } = request;
        self.check_images(&images)?;

        let generated = self
            .run(&images, voice_note.as_ref(), language.as_deref())
            .await;

        let mut listing = Listing::new(
            generate_listing_id(),
            now_millis(),
            images,
            generated.content,
        );
        listing.voice_note = voice_note;
        listing.facts = Some(generated.facts);
        listing.variants = generated.variants;
        listing.video_script = generated.video_script;
        listing.language = generated.language;

        tracing::info!(
            listing_id = %listing.id,
            provider = self.provider.name(),
            images = listing.images.len(),
            "generated listing"
        );
        Ok(listing)
    }

    /// Re-run the pipeline over a stored listing's images and voice note.
    ///
    /// Keeps `id` and `created_at`. A stored video script survives when this
    /// run produces none.
    ///
    /// # Errors
    ///
    /// Same as [`Generator::generate_listing`].
    pub async fn regenerate_listing(
        &self,
        existing: &Listing,
        language: Option<&str>,
    ) -> Result<Listing, AiError> {
        self.check_images(&existing.images)?;

        let generated = self
            .run(&existing.images, existing.voice_note.as_ref(), language)
            .await;

        let listing = Listing {
            id: existing.id.clone(),
            created_at: existing.created_at,
            updated_at: now_millis()
                .max(existing.updated_at)
                .max(existing.created_at),
            images: existing.images.clone(),
            voice_note: existing.voice_note.clone(),
            content: generated.content,
            facts: Some(generated.facts),
            variants: generated.variants,
            video_script: generated
                .video_script
                .or_else(|| existing.video_script.clone()),
            language: generated.language,
        };

        tracing::info!(
            listing_id = %listing.id,
            provider = self.provider.name(),
            "regenerated listing"
        );
        Ok(listing)
    }

    fn check_images(&self, images: &[ImageAsset]) -> Result<(), AiError> {
        if images.is_empty() {
            return Err(AiError::InvalidRequest(
                "at least one image is required".to_string(),
            ));
        }
        if images.len() > self.max_images {
            return Err(AiError::InvalidRequest(format!(
                "{} images given, at most {} allowed",
                images.len(),
                self.max_images
            )));
        }
        Ok(())
    }

    async fn run(
        &self,
        images: &[ImageAsset],
        voice_note: Option<&VoiceNote>,
        language: Option<&str>,
    ) -> Generated {
        let transcript = voice_note.and_then(VoiceNote::usable_transcript);

        let result = self.provider.extract_facts(images, transcript).await;
        let mut facts = self.recover("facts", result, || {
            FallbackProvider::facts(images, transcript)
        });

        let result = self.provider.write_listing(&facts).await;
        let mut content = self.recover("listing", result, || FallbackProvider::listing(&facts));

        let result = self.provider.proofread(&content.description).await;
        content.description = self.recover("proofread", result, || {
            FallbackProvider::proofread_text(&content.description)
        });

        content.keywords = normalize_keywords(std::mem::take(&mut content.keywords));
        if content.suggested_price.is_none() {
            content.suggested_price = Some(self.prices.suggest(&facts));
        }

        let result = self.provider.rewrite_tones(&content).await;
        let variants = self.recover("tones", result, || FallbackProvider::tones(&content));

        let video_script = match transcript {
            Some(transcript) => {
                let result = self.provider.summarize_voice(transcript, &facts).await;
                let summary = self.recover("summarize", result, || {
                    FallbackProvider::summary(transcript, &facts)
                });
                if facts.notes.as_deref().map_or(true, |n| n.trim().is_empty()) {
                    facts.notes = Some(summary.summary);
                }
                Some(summary.video_script)
            }
            None => None,
        };

        let language = language
            .map(|l| l.trim().to_ascii_lowercase())
            .filter(|l| !l.is_empty());
        if let Some(language) = language.as_deref().filter(|l| needs_translation(l)) {
            content.title = self.translate(&content.title, language).await;
            content.description = self.translate(&content.description, language).await;
        }

        Generated {
            content,
            facts,
            variants,
            video_script,
            language,
        }
    }

    async fn translate(&self, text: &str, language: &str) -> String {
        let result = self.provider.translate(text, language).await;
        self.recover("translate", result, || {
            FallbackProvider::translate_text(text, language)
        })
    }

    fn recover<T>(
        &self,
        step: &'static str,
        result: Result<T, AiError>,
        fallback: impl FnOnce() -> T,
    ) -> T {
        match result {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    step,
                    provider = self.provider.name(),
                    error = %e,
                    "capability step failed; using fallback output"
                );
                fallback()
            }
        }
    }
}

fn needs_translation(language: &str) -> bool {
    let language = language.trim();
    !language.is_empty() && !language.eq_ignore_ascii_case("en")
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;

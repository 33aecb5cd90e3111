use async_trait::async_trait;
use snaplist_core::{build_export, Tone, VideoScript};

use super::*;
use crate::provider::VoiceSummary;

/// Provider whose every capability fails.
struct DownProvider;

#[async_trait]
impl CapabilityProvider for DownProvider {
    fn name(&self) -> &'static str {
        "down"
    }

    async fn extract_facts(
        &self,
        _images: &[ImageAsset],
        _transcript: Option<&str>,
    ) -> Result<ProductFacts, AiError> {
        Err(AiError::Api("facts: unavailable".to_string()))
    }

    async fn write_listing(&self, _facts: &ProductFacts) -> Result<ListingContent, AiError> {
        Err(AiError::Api("listing: unavailable".to_string()))
    }

    async fn rewrite_tones(&self, _content: &ListingContent) -> Result<Vec<ToneVariant>, AiError> {
        Err(AiError::Api("tones: unavailable".to_string()))
    }

    async fn proofread(&self, _text: &str) -> Result<String, AiError> {
        Err(AiError::Api("proofread: unavailable".to_string()))
    }

    async fn translate(&self, _text: &str, _language: &str) -> Result<String, AiError> {
        Err(AiError::Api("translate: unavailable".to_string()))
    }

    async fn summarize_voice(
        &self,
        _transcript: &str,
        _facts: &ProductFacts,
    ) -> Result<VoiceSummary, AiError> {
        Err(AiError::Api("summarize: unavailable".to_string()))
    }
}

/// Provider that answers facts and listing with fixed values and fails the rest.
struct PartialProvider;

#[async_trait]
impl CapabilityProvider for PartialProvider {
    fn name(&self) -> &'static str {
        "partial"
    }

    async fn extract_facts(
        &self,
        _images: &[ImageAsset],
        _transcript: Option<&str>,
    ) -> Result<ProductFacts, AiError> {
        Ok(ProductFacts {
            category: "Books".to_string(),
            condition: "Good".to_string(),
            keywords: vec!["novel".to_string()],
            ..ProductFacts::default()
        })
    }

    async fn write_listing(&self, _facts: &ProductFacts) -> Result<ListingContent, AiError> {
        Ok(ListingContent {
            title: "Paperback novel".to_string(),
            description: "a  well loved paperback".to_string(),
            keywords: vec![
                " novel ".to_string(),
                "Novel".to_string(),
                String::new(),
                "paperback".to_string(),
            ],
            suggested_price: Some(12),
        })
    }

    async fn rewrite_tones(&self, _content: &ListingContent) -> Result<Vec<ToneVariant>, AiError> {
        Err(AiError::Api("tones: unavailable".to_string()))
    }

    async fn proofread(&self, _text: &str) -> Result<String, AiError> {
        Ok("A well-loved paperback.".to_string())
    }

    async fn translate(&self, text: &str, language: &str) -> Result<String, AiError> {
        Ok(format!("{text} ({language})"))
    }

    async fn summarize_voice(
        &self,
        _transcript: &str,
        _facts: &ProductFacts,
    ) -> Result<VoiceSummary, AiError> {
        Err(AiError::Api("summarize: unavailable".to_string()))
    }
}

fn image() -> ImageAsset {
    ImageAsset {
        data: "aGVsbG8=".to_string(),
        mime_type: "image/jpeg".to_string(),
    }
}

fn voice(transcript: &str) -> VoiceNote {
    VoiceNote {
        data: "dm9pY2U=".to_string(),
        mime_type: "audio/webm".to_string(),
        transcript: Some(transcript.to_string()),
    }
}

fn request(images: usize) -> GenerationRequest {
    GenerationRequest {
        images: vec![image(); images],
        voice_note: None,
        language: None,
    }
}

#[tokio::test]
async fn rejects_request_without_images() {
    let prices = PriceTable::default();
    let generator = Generator::new(&FallbackProvider, &prices, 5);
    let err = generator.generate_listing(request(0)).await.unwrap_err();
    assert!(matches!(err, AiError::InvalidRequest(_)), "got {err:?}");
}

#[tokio::test]
async fn rejects_request_over_image_limit() {
    let prices = PriceTable::default();
    let generator = Generator::new(&FallbackProvider, &prices, 2);
    let err = generator.generate_listing(request(3)).await.unwrap_err();
    assert!(matches!(err, AiError::InvalidRequest(ref m) if m.contains("at most 2")));
}

#[tokio::test]
async fn failing_provider_falls_back_on_every_step() {
    let prices = PriceTable::default();
    let generator = Generator::new(&DownProvider, &prices, 5);

    let listing = generator.generate_listing(request(2)).await.unwrap();

    assert!(listing.id.starts_with("listing_"));
    assert_eq!(listing.created_at, listing.updated_at);
    assert_eq!(listing.images.len(), 2);
    let facts = listing.facts.as_ref().unwrap();
    assert_eq!(facts.category, "General");
    assert_eq!(listing.content.title, "General - Good condition");
    // Unknown category (50) times Good (0.65).
    assert_eq!(listing.content.suggested_price, Some(33));
    let tones: Vec<Tone> = listing.variants.iter().map(|v| v.tone).collect();
    assert_eq!(tones, Tone::ALL.to_vec());
    assert!(listing.video_script.is_none());
}

#[tokio::test]
async fn provider_price_and_keywords_are_kept_and_normalized() {
    let prices = PriceTable::default();
    let generator = Generator::new(&PartialProvider, &prices, 5);

    let listing = generator.generate_listing(request(1)).await.unwrap();

    assert_eq!(listing.content.description, "A well-loved paperback.");
    assert_eq!(listing.content.keywords, vec!["novel", "paperback"]);
    assert_eq!(listing.content.suggested_price, Some(12));
    // Tones failed and came from the fallback, built on the provider content.
    assert_eq!(
        listing.variant(Tone::Premium).unwrap().content.title,
        "Premium Paperback novel"
    );
}

#[tokio::test]
async fn transcript_produces_video_script_and_notes() {
    let prices = PriceTable::default();
    let generator = Generator::new(&DownProvider, &prices, 5);
    let mut req = request(1);
    req.voice_note = Some(voice("Vintage camera with leather strap. Works fine."));

    let listing = generator.generate_listing(req).await.unwrap();

    let script = listing.video_script.as_ref().unwrap();
    assert_eq!(script.duration, 30);
    assert!(script.script.contains("Vintage camera with leather strap."));
    let facts = listing.facts.as_ref().unwrap();
    assert_eq!(facts.keywords, vec!["vintage", "camera", "leather", "strap", "works"]);
    assert_eq!(listing.transcript(), Some("Vintage camera with leather strap. Works fine."));
}

#[tokio::test]
async fn blank_transcript_produces_no_video_script() {
    let prices = PriceTable::default();
    let generator = Generator::new(&DownProvider, &prices, 5);
    let mut req = request(1);
    req.voice_note = Some(voice("   "));

    let listing = generator.generate_listing(req).await.unwrap();
    assert!(listing.video_script.is_none());
}

#[tokio::test]
async fn non_english_language_translates_title_and_description() {
    let prices = PriceTable::default();
    let generator = Generator::new(&PartialProvider, &prices, 5);
    let mut req = request(1);
    req.language = Some("es".to_string());

    let listing = generator.generate_listing(req).await.unwrap();
    assert_eq!(listing.content.title, "Paperback novel (es)");
    assert_eq!(listing.content.description, "A well-loved paperback. (es)");
}

#[tokio::test]
async fn generation_language_is_recorded_and_exported() {
    let prices = PriceTable::default();
    let generator = Generator::new(&FallbackProvider, &prices, 5);
    let mut req = request(1);
    req.language = Some(" ES ".to_string());

    let listing = generator.generate_listing(req).await.unwrap();
    assert_eq!(listing.language.as_deref(), Some("es"));
    assert_eq!(listing.content.title, "[es] General - Good condition");

    let blob = build_export(&listing, None, "en", &prices);
    assert_eq!(blob.language, "es");
    assert_eq!(blob.title, listing.content.title);
}

#[tokio::test]
async fn listing_without_language_has_none_recorded() {
    let prices = PriceTable::default();
    let generator = Generator::new(&FallbackProvider, &prices, 5);

    let listing = generator.generate_listing(request(1)).await.unwrap();
    assert!(listing.language.is_none());
}

#[tokio::test]
async fn english_language_skips_translation() {
    let prices = PriceTable::default();
    let generator = Generator::new(&PartialProvider, &prices, 5);
    let mut req = request(1);
    req.language = Some("EN".to_string());

    let listing = generator.generate_listing(req).await.unwrap();
    assert_eq!(listing.content.title, "Paperback novel");
}

#[tokio::test]
async fn failed_translation_falls_back_to_tagged_text() {
    let prices = PriceTable::default();
    let generator = Generator::new(&DownProvider, &prices, 5);
    let mut req = request(1);
    req.language = Some("fr".to_string());

    let listing = generator.generate_listing(req).await.unwrap();
    assert_eq!(listing.content.title, "[fr] General - Good condition");
}

#[tokio::test]
async fn regenerate_keeps_identity_and_prior_video_script() {
    let prices = PriceTable::default();
    let generator = Generator::new(&PartialProvider, &prices, 5);

    let mut existing = Listing::new(
        "listing_1_abcdefgh".to_string(),
        1_000,
        vec![image()],
        ListingContent::default(),
    );
    existing.video_script = Some(VideoScript {
        script: "old script".to_string(),
        duration: 20,
        key_points: vec![],
    });

    let regenerated = generator.regenerate_listing(&existing, None).await.unwrap();

    assert_eq!(regenerated.id, existing.id);
    assert_eq!(regenerated.created_at, 1_000);
    assert!(regenerated.updated_at >= regenerated.created_at);
    assert_eq!(regenerated.content.title, "Paperback novel");
    assert_eq!(regenerated.video_script, existing.video_script);
}

#[tokio::test]
async fn regenerate_never_moves_updated_at_backwards() {
    let prices = PriceTable::default();
    let generator = Generator::new(&FallbackProvider, &prices, 5);

    let mut existing = Listing::new(
        "listing_1_abcdefgh".to_string(),
        1_000,
        vec![image()],
        ListingContent::default(),
    );
    let future = now_millis() + 60_000;
    existing.updated_at = future;

    let regenerated = generator.regenerate_listing(&existing, Some("fr")).await.unwrap();
    assert!(regenerated.updated_at >= future);
    assert_eq!(regenerated.language.as_deref(), Some("fr"));
}

#[tokio::test]
async fn regenerate_with_transcript_replaces_video_script() {
    let prices = PriceTable::default();
    let generator = Generator::new(&DownProvider, &prices, 5);

    let mut existing = Listing::new(
        "listing_1_abcdefgh".to_string(),
        1_000,
        vec![image()],
        ListingContent::default(),
    );
    existing.voice_note = Some(voice("Brand new kettle."));
    existing.video_script = Some(VideoScript {
        script: "old script".to_string(),
        duration: 20,
        key_points: vec![],
    });

    let regenerated = generator.regenerate_listing(&existing, None).await.unwrap();

    let script = regenerated.video_script.unwrap();
    assert_ne!(script.script, "old script");
    assert_eq!(regenerated.voice_note, existing.voice_note);
}

#[test]
fn needs_translation_ignores_english_and_blank() {
    assert!(!needs_translation("en"));
    assert!(!needs_translation(" "));
    assert!(needs_translation("de"));
}

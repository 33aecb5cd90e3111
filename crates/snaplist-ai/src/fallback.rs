//! Local placeholder capabilities used when no AI service is reachable.
//!
//! Output has the same shape as the live provider's but is built from the
//! inputs with fixed templates, so it is deterministic and never fails.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use snaplist_core::{
    normalize_keywords, ImageAsset, ListingContent, ProductFacts, Tone, ToneVariant, VideoScript,
};

use crate::error::AiError;
use crate::provider::{CapabilityProvider, VoiceSummary};

const PLACEHOLDER_CATEGORY: &str = "General";
const PLACEHOLDER_CONDITION: &str = "Good";
const MAX_TRANSCRIPT_KEYWORDS: usize = 5;
const MAX_KEY_POINTS: usize = 3;
const SUMMARY_MAX_CHARS: usize = 160;
const VIDEO_DURATION_SECS: u32 = 30;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z'-]{3,}").expect("valid regex"));

const STOPWORDS: &[&str] = &[
    "about", "been", "from", "have", "just", "only", "really", "that", "there", "they", "this",
    "very", "what", "when", "which", "with", "would", "could", "some", "it's",
];

/// Placeholder provider. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackProvider;

impl FallbackProvider {
    #[must_use]
    pub fn facts(images: &[ImageAsset], transcript: Option<&str>) -> ProductFacts {
        ProductFacts {
            category: PLACEHOLDER_CATEGORY.to_string(),
            brand: None,
            color: None,
            condition: PLACEHOLDER_CONDITION.to_string(),
            unique_features: Vec::new(),
            keywords: transcript.map(transcript_keywords).unwrap_or_default(),
            estimated_price: None,
            notes: Some(format!(
                "Placeholder details generated from {} photo(s).",
                images.len()
            )),
        }
    }

    #[must_use]
    pub fn listing(facts: &ProductFacts) -> ListingContent {
        let title = [facts.brand.as_deref(), facts.color.as_deref(), Some(facts.category.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let title = format!("{title} - {} condition", facts.condition);

        let mut description = format!(
            "{} in {} condition.",
            facts.category,
            facts.condition.to_lowercase()
        );
        if !facts.unique_features.is_empty() {
            description.push_str(&format!(" Features: {}.", facts.unique_features.join(", ")));
        }

        let keywords = normalize_keywords(
            facts
                .keywords
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(facts.category.as_str()))
                .chain(facts.brand.as_deref()),
        );

        ListingContent {
            title,
            description,
            keywords,
            suggested_price: None,
        }
    }

    #[must_use]
    pub fn tones(content: &ListingContent) -> Vec<ToneVariant> {
        Tone::ALL
            .into_iter()
            .map(|tone| Self::tone(content, tone))
            .collect()
    }

    #[must_use]
    pub fn tone(content: &ListingContent, tone: Tone) -> ToneVariant {
        let (title, description) = match tone {
            Tone::Friendly => (
                format!("Lovely {}", content.title),
                format!("Hi there! {} Happy to answer any questions.", content.description),
            ),
            Tone::Premium => (
                format!("Premium {}", content.title),
                format!(
                    "{} Carefully kept and ready for a discerning new owner.",
                    content.description
                ),
            ),
            Tone::Bargain => (
                format!("Great deal: {}", content.title),
                format!("{} Priced to sell fast.", content.description),
            ),
        };
        ToneVariant {
            tone,
            content: ListingContent {
                title,
                description,
                keywords: content.keywords.clone(),
                suggested_price: content.suggested_price,
            },
        }
    }

    /// Collapses whitespace, capitalizes the first letter and makes sure the
    /// text ends with sentence punctuation.
    #[must_use]
    pub fn proofread_text(text: &str) -> String {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut chars = collapsed.chars();
        let Some(first) = chars.next() else {
            return String::new();
        };
        let mut out: String = first.to_uppercase().chain(chars).collect();
        if !out.ends_with(['.', '!', '?']) {
            out.push('.');
        }
        out
    }

    /// Tags the text with the target language; English passes through.
    #[must_use]
    pub fn translate_text(text: &str, language: &str) -> String {
        if language.eq_ignore_ascii_case("en") {
            text.to_string()
        } else {
            format!("[{}] {text}", language.to_lowercase())
        }
    }

    #[must_use]
    pub fn summary(transcript: &str, facts: &ProductFacts) -> VoiceSummary {
        let collapsed = transcript.split_whitespace().collect::<Vec<_>>().join(" ");
        let first_sentence = collapsed
            .split_inclusive(['.', '!', '?'])
            .next()
            .unwrap_or_default()
            .trim();
        let summary: String = first_sentence.chars().take(SUMMARY_MAX_CHARS).collect();

        let key_points: Vec<String> = if facts.unique_features.is_empty() {
            facts.keywords.iter().take(MAX_KEY_POINTS).cloned().collect()
        } else {
            facts
                .unique_features
                .iter()
                .take(MAX_KEY_POINTS)
                .cloned()
                .collect()
        };

        let script = format!(
            "Introducing this {} in {} condition. {summary} Check out the listing for details!",
            facts.category.to_lowercase(),
            facts.condition.to_lowercase()
        );

        VoiceSummary {
            summary,
            video_script: VideoScript {
                script,
                duration: VIDEO_DURATION_SECS,
                key_points,
            },
        }
    }
}

/// Distinct content words from a transcript, in order of first appearance.
fn transcript_keywords(transcript: &str) -> Vec<String> {
    let words = WORD
        .find_iter(transcript)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| !STOPWORDS.contains(&w.as_str()));
    let mut keywords = normalize_keywords(words);
    keywords.truncate(MAX_TRANSCRIPT_KEYWORDS);
    keywords
}

#[async_trait]
impl CapabilityProvider for FallbackProvider {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn extract_facts(
        &self,
        images: &[ImageAsset],
        transcript: Option<&str>,
    ) -> Result<ProductFacts, AiError> {
        Ok(Self::facts(images, transcript))
    }

    async fn write_listing(&self, facts: &ProductFacts) -> Result<ListingContent, AiError> {
        Ok(Self::listing(facts))
    }

    async fn rewrite_tones(&self, content: &ListingContent) -> Result<Vec<ToneVariant>, AiError> {
        Ok(Self::tones(content))
    }

    async fn proofread(&self, text: &str) -> Result<String, AiError> {
        Ok(Self::proofread_text(text))
    }

    async fn translate(&self, text: &str, language: &str) -> Result<String, AiError> {
        Ok(Self::translate_text(text, language))
    }

    async fn summarize_voice(
        &self,
        transcript: &str,
        facts: &ProductFacts,
    ) -> Result<VoiceSummary, AiError> {
        Ok(Self::summary(transcript, facts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facts_take_keywords_from_transcript() {
        let facts = FallbackProvider::facts(
            &[],
            Some("This leather jacket is really warm, leather lining and brass zipper."),
        );
        assert_eq!(facts.category, "General");
        assert_eq!(facts.condition, "Good");
        assert_eq!(facts.keywords, vec!["leather", "jacket", "warm", "lining", "brass"]);
    }

    #[test]
    fn facts_without_transcript_have_no_keywords() {
        let facts = FallbackProvider::facts(&[], None);
        assert!(facts.keywords.is_empty());
        assert_eq!(
            facts.notes.as_deref(),
            Some("Placeholder details generated from 0 photo(s).")
        );
    }

    #[test]
    fn listing_title_uses_brand_color_and_category() {
        let facts = ProductFacts {
            category: "Electronics".to_string(),
            brand: Some("Sony".to_string()),
            color: Some("Black".to_string()),
            condition: "Like New".to_string(),
            unique_features: vec!["noise cancelling".to_string()],
            keywords: vec!["headphones".to_string()],
            ..ProductFacts::default()
        };
        let content = FallbackProvider::listing(&facts);
        assert_eq!(content.title, "Sony Black Electronics - Like New condition");
        assert_eq!(
            content.description,
            "Electronics in like new condition. Features: noise cancelling."
        );
        assert_eq!(content.keywords, vec!["headphones", "Electronics", "Sony"]);
        assert!(content.suggested_price.is_none());
    }

    #[test]
    fn tones_cover_every_tone_once() {
        let variants = FallbackProvider::tones(&ListingContent {
            title: "Lamp".to_string(),
            description: "Brass lamp.".to_string(),
            keywords: vec![],
            suggested_price: Some(12),
        });
        let tones: Vec<Tone> = variants.iter().map(|v| v.tone).collect();
        assert_eq!(tones, Tone::ALL.to_vec());
        assert!(variants.iter().all(|v| v.content.suggested_price == Some(12)));
        assert_eq!(variants[2].content.title, "Great deal: Lamp");
    }

    #[test]
    fn proofread_fixes_spacing_capitalization_and_punctuation() {
        assert_eq!(
            FallbackProvider::proofread_text("  works   great  "),
            "Works great."
        );
        assert_eq!(FallbackProvider::proofread_text("Sold as is!"), "Sold as is!");
        assert_eq!(FallbackProvider::proofread_text("   "), "");
    }

    #[test]
    fn translate_tags_non_english_text() {
        assert_eq!(FallbackProvider::translate_text("Hello", "EN"), "Hello");
        assert_eq!(FallbackProvider::translate_text("Hello", "ES"), "[es] Hello");
    }

    #[test]
    fn summary_uses_first_sentence_and_features() {
        let facts = ProductFacts {
            category: "Toys".to_string(),
            condition: "Fair".to_string(),
            unique_features: vec!["wooden".to_string(), "hand painted".to_string()],
            ..ProductFacts::default()
        };
        let out = FallbackProvider::summary("Old train set.  My kids loved it.", &facts);
        assert_eq!(out.summary, "Old train set.");
        assert_eq!(out.video_script.duration, 30);
        assert_eq!(out.video_script.key_points, vec!["wooden", "hand painted"]);
        assert!(out
            .video_script
            .script
            .starts_with("Introducing this toys in fair condition. Old train set."));
    }
}

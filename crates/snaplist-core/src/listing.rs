use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Default cap on the number of images attached to one listing.
pub const DEFAULT_MAX_IMAGES: usize = 5;

/// An image attached to a listing, stored inline as base64 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    /// Base64-encoded image bytes.
    pub data: String,
    /// MIME type, e.g. `"image/jpeg"`.
    pub mime_type: String,
}

/// A recorded voice note with an optional transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceNote {
    /// Base64-encoded audio bytes.
    pub data: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

impl VoiceNote {
    /// Returns the transcript when it contains more than whitespace.
    #[must_use]
    pub fn usable_transcript(&self) -> Option<&str> {
        self.transcript
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// The marketplace-facing text of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingContent {
    pub title: String,
    pub description: String,
    /// Set-like: see [`normalize_keywords`].
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_price: Option<u32>,
}

/// Structured attributes extracted from the product photos and voice note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFacts {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Free-form condition label, e.g. `"Like New"`. See [`crate::Condition`].
    pub condition: String,
    #[serde(default)]
    pub unique_features: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Model-estimated price. Takes precedence over the heuristic when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Friendly,
    Premium,
    Bargain,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Friendly, Tone::Premium, Tone::Bargain];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Friendly => "friendly",
            Tone::Premium => "premium",
            Tone::Bargain => "bargain",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "friendly" => Ok(Tone::Friendly),
            "premium" => Ok(Tone::Premium),
            "bargain" => Ok(Tone::Bargain),
            other => Err(format!(
                "unknown tone '{other}' (expected friendly, premium or bargain)"
            )),
        }
    }
}

/// Listing content rewritten in one tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneVariant {
    pub tone: Tone,
    pub content: ListingContent,
}

/// A short promotional video script built from the voice note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoScript {
    pub script: String,
    /// Target duration in seconds.
    pub duration: u32,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// A generated marketplace listing, the only persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds; refreshed by the store on every save.
    pub updated_at: i64,
    #[serde(default)]
    pub images: Vec<ImageAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_note: Option<VoiceNote>,
    pub content: ListingContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<ProductFacts>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ToneVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_script: Option<VideoScript>,
    /// Language code the content was generated in, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Listing {
    /// Creates a listing with `updated_at == created_at` and no optional data.
    #[must_use]
    pub fn new(id: String, created_at: i64, images: Vec<ImageAsset>, content: ListingContent) -> Self {
        Self {
            id,
            created_at,
            updated_at: created_at,
            images,
            voice_note: None,
            content,
            facts: None,
            variants: Vec::new(),
            video_script: None,
            language: None,
        }
    }

    /// Checks the record invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] for an empty id, too many images, or an
    /// `updated_at` earlier than `created_at`.
    pub fn validate(&self, max_images: usize) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::EmptyId);
        }
        if self.images.len() > max_images {
            return Err(CoreError::TooManyImages {
                count: self.images.len(),
                max: max_images,
            });
        }
        if self.updated_at < self.created_at {
            return Err(CoreError::TimestampOrder {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Returns the stored variant for `tone`, if any.
    #[must_use]
    pub fn variant(&self, tone: Tone) -> Option<&ToneVariant> {
        self.variants.iter().find(|v| v.tone == tone)
    }

    /// Voice transcript, if a voice note with a non-blank transcript is attached.
    #[must_use]
    pub fn transcript(&self) -> Option<&str> {
        self.voice_note.as_ref().and_then(VoiceNote::usable_transcript)
    }
}

/// Trims keywords, drops blanks and case-insensitive duplicates.
///
/// The first spelling seen is kept, in its original position.
#[must_use]
pub fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .filter_map(|k| {
            let trimmed = k.as_ref().trim();
            if trimmed.is_empty() || !seen.insert(trimmed.to_lowercase()) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

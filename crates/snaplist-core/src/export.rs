use serde::Serialize;

use crate::{Listing, PriceTable, Tone, VideoScript};

/// Downloadable summary of a listing. Written once, never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBlob {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub price: u32,
    /// `None` when the base (untoned) content was exported.
    pub tone: Option<Tone>,
    pub language: String,
    pub video_script: Option<VideoScript>,
}

impl ExportBlob {
    /// Pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Build the export blob for `listing`.
///
/// When `tone` names a stored variant, that variant's content is exported;
/// otherwise the base content is used and `tone` is recorded as `None`.
/// The price is the exported content's suggested price, then the base
/// content's, then the heuristic over stored facts, then zero.
///
/// The recorded language is the one the listing was generated in;
/// `default_language` applies only to listings that carry none.
#[must_use]
pub fn build_export(
    listing: &Listing,
    tone: Option<Tone>,
    default_language: &str,
    prices: &PriceTable,
) -> ExportBlob {
    let variant = tone.and_then(|t| listing.variant(t));
    let content = variant.map_or(&listing.content, |v| &v.content);

    let price = content
        .suggested_price
        .or(listing.content.suggested_price)
        .or_else(|| listing.facts.as_ref().map(|f| prices.suggest(f)))
        .unwrap_or(0);

    ExportBlob {
        title: content.title.clone(),
        description: content.description.clone(),
        keywords: content.keywords.clone(),
        price,
        tone: variant.map(|v| v.tone),
        language: listing
            .language
            .clone()
            .unwrap_or_else(|| default_language.to_string()),
        video_script: listing.video_script.clone(),
    }
}

/// Default download file name for a listing export.
#[must_use]
pub fn export_file_name(listing_id: &str) -> String {
    format!("listing-{listing_id}.json")
}

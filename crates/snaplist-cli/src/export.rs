use std::path::{Path, PathBuf};

use anyhow::Context;
use snaplist_core::{build_export, export_file_name, Condition, PriceTable, ProductFacts, Tone};
use snaplist_db::ListingStore;

/// Write the export document for one listing.
///
/// # Errors
///
/// Returns an error if the listing does not exist or the file cannot be written.
pub(crate) async fn run_export(
    store: &ListingStore,
    prices: &PriceTable,
    id: &str,
    tone: Option<Tone>,
    language: &str,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let listing = store
        .get(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("listing '{id}' not found"))?;

    if let Some(t) = tone {
        if listing.variant(t).is_none() {
            tracing::warn!(listing_id = id, tone = %t, "no stored variant; exporting base content");
        }
    }

    let blob = build_export(&listing, tone, language, prices);
    let path = out.map_or_else(|| PathBuf::from(export_file_name(id)), Path::to_path_buf);
    std::fs::write(&path, blob.to_json()?)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("exported listing {id} to {}", path.display());
    Ok(())
}

/// Print the suggested price for a category and condition.
pub(crate) fn run_price(
    prices: &PriceTable,
    category: &str,
    condition: &str,
    estimated: Option<u32>,
) {
    println!("{}", price_line(prices, category, condition, estimated));
}

/// One-line price summary. Known condition grades are shown by their
/// canonical label; anything else is echoed trimmed.
fn price_line(
    prices: &PriceTable,
    category: &str,
    condition: &str,
    estimated: Option<u32>,
) -> String {
    let facts = ProductFacts {
        category: category.to_string(),
        condition: condition.to_string(),
        estimated_price: estimated,
        ..ProductFacts::default()
    };
    let grade = Condition::from_label(condition)
        .map_or_else(|| condition.trim().to_string(), |c| c.label().to_string());
    format!("{} / {grade}: ${}", category.trim(), prices.suggest(&facts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_line_uses_canonical_condition_label() {
        let line = price_line(&PriceTable::default(), "Electronics", "like-new", None);
        assert_eq!(line, "Electronics / Like New: $170");
    }

    #[test]
    fn price_line_echoes_unknown_condition() {
        // Unknown category (50) times unknown condition (0.5).
        let line = price_line(&PriceTable::default(), " Widgets ", " mint ", None);
        assert_eq!(line, "Widgets / mint: $25");
    }

    #[test]
    fn price_line_prefers_estimate() {
        let line = price_line(&PriceTable::default(), "Books", "Poor", Some(42));
        assert_eq!(line, "Books / Poor: $42");
    }
}

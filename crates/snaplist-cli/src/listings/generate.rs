use std::path::{Path, PathBuf};

use snaplist_ai::{GenerationRequest, Generator};
use snaplist_db::ListingStore;

use crate::media::{read_image, read_voice_note};

/// Generate a listing from files on disk and save it.
///
/// With `dry_run` the listing is printed and nothing is written.
///
/// # Errors
///
/// Returns an error if a file cannot be read, the request is rejected by the
/// pipeline, or the store write fails. Provider failures are absorbed by the
/// pipeline's fallback.
pub(crate) async fn run_generate(
    store: &ListingStore,
    generator: &Generator<'_>,
    image_paths: &[PathBuf],
    voice: Option<&Path>,
    transcript: Option<&str>,
    language: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    let images = image_paths
        .iter()
        .map(|p| read_image(p))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let voice_note = read_voice_note(voice, transcript)?;

    let listing = generator
        .generate_listing(GenerationRequest {
            images,
            voice_note,
            language: Some(language.to_string()),
        })
        .await?;

    if dry_run {
        super::print_listing(&listing);
        println!();
        println!("dry-run: listing was not saved");
        return Ok(());
    }

    let saved = store.save(&listing).await?;
    super::print_listing(&saved);
    Ok(())
}

/// Regenerate a stored listing in place.
///
/// # Errors
///
/// Returns an error if the listing does not exist or the store fails.
pub(crate) async fn run_regenerate(
    store: &ListingStore,
    generator: &Generator<'_>,
    id: &str,
    language: &str,
) -> anyhow::Result<()> {
    let existing = store
        .get(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("listing '{id}' not found"))?;

    let listing = generator
        .regenerate_listing(&existing, Some(language))
        .await?;
    let saved = store.save(&listing).await?;
    super::print_listing(&saved);
    Ok(())
}

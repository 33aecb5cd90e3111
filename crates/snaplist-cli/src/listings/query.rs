use snaplist_db::ListingStore;

/// Print stored listings newest first, up to `limit` rows.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub(crate) async fn run_list(store: &ListingStore, limit: usize) -> anyhow::Result<()> {
    let listings = store.get_all().await?;

    if listings.is_empty() {
        println!("no listings found; run `generate` first");
        return Ok(());
    }

    let header = format!("{:<32}{:<18}{:<9}TITLE", "ID", "CREATED", "PRICE");
    println!("{header}");
    for listing in listings.iter().take(limit) {
        let title = &listing.content.title;
        let title_display = if title.chars().count() > 50 {
            format!("{}...", title.chars().take(50).collect::<String>())
        } else {
            title.clone()
        };
        println!(
            "{:<32}{:<18}{:<9}{}",
            listing.id,
            super::fmt_millis(listing.created_at),
            super::fmt_price(listing.content.suggested_price),
            title_display
        );
    }
    if listings.len() > limit {
        println!("... {} more", listings.len() - limit);
    }

    Ok(())
}

/// Print one listing.
///
/// # Errors
///
/// Returns an error if the listing does not exist or the store cannot be read.
pub(crate) async fn run_show(store: &ListingStore, id: &str) -> anyhow::Result<()> {
    let listing = store
        .get(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("listing '{id}' not found"))?;
    super::print_listing(&listing);
    Ok(())
}

/// Delete one listing. Deleting an unknown id is not an error.
///
/// # Errors
///
/// Returns an error if the store write fails.
pub(crate) async fn run_delete(store: &ListingStore, id: &str) -> anyhow::Result<()> {
    if store.delete(id).await? {
        println!("deleted listing {id}");
    } else {
        println!("no listing with id {id}");
    }
    Ok(())
}

/// Delete every listing. Requires `--yes`.
///
/// # Errors
///
/// Returns an error without `confirmed`, or if the store write fails.
pub(crate) async fn run_clear(store: &ListingStore, confirmed: bool) -> anyhow::Result<()> {
    if !confirmed {
        anyhow::bail!("refusing to delete all listings without --yes");
    }
    let removed = store.clear().await?;
    println!("deleted {removed} listing(s)");
    Ok(())
}

//! Listing command handlers for the CLI.
//!
//! `generate` and `regenerate` run the AI pipeline and persist the result;
//! the remaining subcommands read or delete stored listings.

mod generate;
mod query;

use chrono::DateTime;
use snaplist_core::Listing;

pub(crate) use generate::{run_generate, run_regenerate};
pub(crate) use query::{run_clear, run_delete, run_list, run_show};

/// Format epoch milliseconds as a UTC timestamp, or `"-"` when out of range.
fn fmt_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || "-".to_string(),
        |d| d.format("%Y-%m-%d %H:%M").to_string(),
    )
}

fn fmt_price(price: Option<u32>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("${p}"))
}

/// Print a human-readable view of a listing.
fn print_listing(listing: &Listing) {
    println!("ID:          {}", listing.id);
    println!("Created:     {}", fmt_millis(listing.created_at));
    println!("Updated:     {}", fmt_millis(listing.updated_at));
    println!("Images:      {}", listing.images.len());
    println!("Price:       {}", fmt_price(listing.content.suggested_price));
    println!("Title:       {}", listing.content.title);
    println!("Keywords:    {}", listing.content.keywords.join(", "));
    println!();
    println!("{}", listing.content.description);

    if let Some(facts) = &listing.facts {
        println!();
        println!("Category:    {}", facts.category);
        println!("Condition:   {}", facts.condition);
        if let Some(brand) = &facts.brand {
            println!("Brand:       {brand}");
        }
    }

    if !listing.variants.is_empty() {
        println!();
        for variant in &listing.variants {
            println!("[{}] {}", variant.tone, variant.content.title);
        }
    }

    if let Some(script) = &listing.video_script {
        println!();
        println!("Video script ({}s):", script.duration);
        println!("{}", script.script);
    }
}

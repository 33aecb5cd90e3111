mod export;
mod listings;
mod media;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use snaplist_ai::Generator;
use snaplist_core::{AppConfig, PriceTable, Tone};
use snaplist_db::ListingStore;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "snaplist")]
#[command(about = "Turn product photos and a voice note into a marketplace listing")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a listing from product photos and an optional voice note
    Generate {
        /// Product photo (repeat for several)
        #[arg(long = "image", required = true)]
        images: Vec<PathBuf>,
        /// Recorded voice note describing the item
        #[arg(long)]
        voice: Option<PathBuf>,
        /// Transcript of the voice note
        #[arg(long)]
        transcript: Option<String>,
        /// Target language code (defaults to `SNAPLIST_DEFAULT_LANGUAGE`)
        #[arg(long)]
        language: Option<String>,
        /// Print the generated listing without saving it
        #[arg(long)]
        dry_run: bool,
    },
    /// Re-run generation for a stored listing, keeping its id
    Regenerate {
        id: String,
        /// Target language code (defaults to `SNAPLIST_DEFAULT_LANGUAGE`)
        #[arg(long)]
        language: Option<String>,
    },
    /// List stored listings, newest first
    List {
        /// Maximum number of listings to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show one stored listing
    Show { id: String },
    /// Delete one stored listing
    Delete { id: String },
    /// Delete every stored listing
    Clear {
        /// Confirm deletion of all listings
        #[arg(long)]
        yes: bool,
    },
    /// Write a listing export as JSON
    Export {
        id: String,
        /// Export the stored variant for this tone (friendly, premium, bargain)
        #[arg(long)]
        tone: Option<Tone>,
        /// Language recorded for listings generated before languages were stored
        /// (defaults to `SNAPLIST_DEFAULT_LANGUAGE`)
        #[arg(long)]
        language: Option<String>,
        /// Output path (defaults to `listing-<id>.json`)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Suggest a price from category and condition
    Price {
        /// Product category (e.g. Electronics)
        #[arg(long)]
        category: String,
        /// Condition label (e.g. "Like New")
        #[arg(long)]
        condition: String,
        /// Model-estimated price; returned unchanged when given
        #[arg(long)]
        estimated: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = snaplist_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("snaplist ready; run `snaplist --help` for commands");
        return Ok(());
    };

    let prices = load_price_table(&config)?;
    let store = ListingStore::from_app_config(&config);

    match command {
        Commands::Generate {
            images,
            voice,
            transcript,
            language,
            dry_run,
        } => {
            let provider = snaplist_ai::select_provider(&config)?;
            let generator = Generator::new(provider.as_ref(), &prices, config.max_images);
            let language = language.as_deref().unwrap_or(&config.default_language);
            listings::run_generate(
                &store,
                &generator,
                &images,
                voice.as_deref(),
                transcript.as_deref(),
                language,
                dry_run,
            )
            .await?;
        }
        Commands::Regenerate { id, language } => {
            let provider = snaplist_ai::select_provider(&config)?;
            let generator = Generator::new(provider.as_ref(), &prices, config.max_images);
            let language = language.as_deref().unwrap_or(&config.default_language);
            listings::run_regenerate(&store, &generator, &id, language).await?;
        }
        Commands::List { limit } => listings::run_list(&store, limit).await?,
        Commands::Show { id } => listings::run_show(&store, &id).await?,
        Commands::Delete { id } => listings::run_delete(&store, &id).await?,
        Commands::Clear { yes } => listings::run_clear(&store, yes).await?,
        Commands::Export {
            id,
            tone,
            language,
            out,
        } => {
            let language = language.as_deref().unwrap_or(&config.default_language);
            export::run_export(&store, &prices, &id, tone, language, out.as_deref()).await?;
        }
        Commands::Price {
            category,
            condition,
            estimated,
        } => export::run_price(&prices, &category, &condition, estimated),
    }

    Ok(())
}

/// The configured price table file, or the built-in table when none is set.
fn load_price_table(config: &AppConfig) -> anyhow::Result<PriceTable> {
    match &config.price_table_path {
        Some(path) => {
            let table = PriceTable::load(path)?;
            tracing::debug!(path = %path.display(), "loaded price table");
            Ok(table)
        }
        None => Ok(PriceTable::default()),
    }
}

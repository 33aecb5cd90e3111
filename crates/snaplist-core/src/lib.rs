//! Domain types, pricing and configuration shared by every snaplist crate.

pub mod app_config;
pub mod config;
pub mod error;
pub mod export;
pub mod id;
pub mod listing;
pub mod price;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use export::{build_export, export_file_name, ExportBlob};
pub use id::{generate_listing_id, now_millis};
pub use listing::{
    normalize_keywords, ImageAsset, Listing, ListingContent, ProductFacts, Tone, ToneVariant,
    VideoScript, VoiceNote, DEFAULT_MAX_IMAGES,
};
pub use price::{suggest_price, Condition, PriceTable};

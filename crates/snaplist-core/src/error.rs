use std::path::PathBuf;

use thiserror::Error;

/// Listing invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("listing id must not be empty")]
    EmptyId,

    #[error("listing has {count} images, maximum is {max}")]
    TooManyImages { count: usize, max: usize },

    #[error("updatedAt ({updated_at}) is earlier than createdAt ({created_at})")]
    TimestampOrder { created_at: i64, updated_at: i64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read price table {path}: {source}")]
    PriceTableIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse price table: {0}")]
    PriceTableParse(#[from] serde_yaml::Error),

    #[error("invalid price table: {0}")]
    InvalidPriceTable(String),
}

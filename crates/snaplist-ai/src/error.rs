use thiserror::Error;

/// Errors returned by capability providers and the generation pipeline.
#[derive(Debug, Error)]
pub enum AiError {
    /// Network or TLS failure, or a non-2xx status from the provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with an `"error"` payload or an unusable result.
    #[error("provider error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured provider base URL could not be parsed.
    #[error("invalid provider base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The generation request itself is unusable (no images, too many images).
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),
}

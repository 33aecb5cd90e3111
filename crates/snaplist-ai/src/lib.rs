//! AI capability boundary and the listing generation pipeline.
//!
//! [`select_provider`] picks a [`LiveProvider`] when a service URL is
//! configured and a [`FallbackProvider`] otherwise. [`Generator`] drives the
//! steps and falls back per step when the provider fails.

pub mod error;
pub mod fallback;
pub mod live;
pub mod pipeline;
pub mod provider;

pub use error::AiError;
pub use fallback::FallbackProvider;
pub use live::LiveProvider;
pub use pipeline::{GenerationRequest, Generator};
pub use provider::{select_provider, CapabilityProvider, VoiceSummary};

//! Inference Client — OpenAI-compatible client for the text-generation service.
//!
//! This module handles all communication with the external endpoint:
//! - A single non-streaming chat completion per recommendation request
//! - Mapping transport and HTTP failures to `ServiceError`
//! - The `RecommendationClient` seam the pipeline depends on
//!
//! Endpoint, key and model come from configuration, so any compatible
//! provider (hosted or local) is a config change, not a code change.

pub mod client;
pub mod errors;
pub mod types;

// Re-exports for convenience
pub use client::{InferenceClient, RecommendationClient};
pub use errors::ServiceError;
pub use types::{ChatMessage, Role};

//! Recommendation pipeline — prompt rendering and response parsing.
//!
//! Submodules:
//! - `prompt`: Fixed system instruction + per-request prompt rendering
//! - `parser`: Staged extraction (structured → naive → canned fallback)

pub mod parser;
pub mod prompt;

// Re-exports for convenience
pub use parser::{parse, RecommendationResult, RecommendationSource, MAX_RECOMMENDATIONS};
pub use prompt::{build as build_prompt, SYSTEM_INSTRUCTION};

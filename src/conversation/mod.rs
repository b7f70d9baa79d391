//! Conversation core — step-by-step collection of gift parameters.
//!
//! Submodules:
//! - `types`: Session ids, the `Step` tag, `ConversationState`, `RecommendationRequest`
//! - `machine`: Pure transitions (`advance`, `reset`, `attach_note`)
//! - `store`: In-memory registry of live conversations with idle pruning
//! - `errors`: `RejectedTransition`

pub mod errors;
pub mod machine;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use errors::RejectedTransition;
pub use store::SessionStore;
pub use types::{ConversationState, RecommendationRequest, SessionId, Step};

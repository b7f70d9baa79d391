//! Conversation error types.

use thiserror::Error;

use crate::catalog::Dimension;

/// A user selection that the step machine refused to apply.
///
/// The state it was applied to is left unchanged; transports re-present
/// the current step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectedTransition {
    /// The selection targets a dimension other than the one being collected.
    /// `expected` is `None` once every dimension has been filled.
    #[error("selection for {got:?} is out of order (expected {expected:?})")]
    OutOfOrder {
        expected: Option<Dimension>,
        got: Dimension,
    },

    /// The key is not a member of the dimension's closed set.
    #[error("unknown {dimension:?} option: '{key}'")]
    UnknownKey { dimension: Dimension, key: String },
}

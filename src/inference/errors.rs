//! Text-generation service error types.
//!
//! All errors implement `std::error::Error` via `thiserror`. None of them is
//! ever shown to the end user: the recommendation pipeline absorbs every
//! variant by falling back to canned suggestions. Logging the cause is the
//! caller's responsibility.

use thiserror::Error;

/// Errors that can occur while talking to the text-generation service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service rejected our credentials (HTTP 401/403, or no key configured).
    #[error("authentication failed: {reason}")]
    Auth { reason: String },

    /// TCP/HTTP connection to the service endpoint failed.
    #[error("connection failed to {endpoint}: {reason}")]
    ConnectionFailed { endpoint: String, reason: String },

    /// The service did not answer within the configured timeout.
    #[error("request timed out after {duration_secs}s")]
    Timeout { duration_secs: u64 },

    /// Any other non-2xx HTTP response.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response carried no usable text.
    #[error("service returned an empty response")]
    EmptyResponse,

    /// The response body was not a chat completion document.
    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },
}

impl ServiceError {
    /// Map a non-success HTTP status to the matching variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => ServiceError::Auth {
                reason: format!("HTTP {status}: {body}"),
            },
            _ => ServiceError::HttpError { status, body },
        }
    }

    /// Short machine-friendly name for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Auth { .. } => "auth",
            ServiceError::ConnectionFailed { .. } => "network",
            ServiceError::Timeout { .. } => "timeout",
            ServiceError::HttpError { .. } => "http",
            ServiceError::EmptyResponse => "empty_response",
            ServiceError::InvalidResponse { .. } => "invalid_response",
        }
    }
}

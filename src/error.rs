//! Error types for query submission

use thiserror::Error;

/// Failure to obtain a usable payload from the backend.
///
/// Never shown to the user; only logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP {status} with unparsable body: {detail}")]
    Status { status: u16, detail: String },

    #[error("response body is not JSON: {0}")]
    Decode(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Lifecycle violations of the query state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("query text is empty")]
    EmptyQuery,

    #[error("a query is already being processed")]
    AlreadySubmitting,

    #[error("no query is being processed")]
    NotSubmitting,
}

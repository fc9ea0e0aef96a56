//! Network messages - communication between App and Network layers

use crate::error::TransportError;
use crate::models::RawResponse;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// POST a question to the query endpoint
    SubmitQuery { id: u64, query: String },
    /// Abandon a query still in flight
    CancelQuery(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A JSON payload was received (any status)
    Payload {
        id: u64,
        status: u16,
        raw: RawResponse,
        time_ms: u64,
    },
    /// No usable payload could be obtained
    TransportFailure {
        id: u64,
        error: TransportError,
        time_ms: u64,
    },
    /// Query was cancelled before completing
    Cancelled { id: u64 },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Payload { id, .. } => *id,
            NetworkResponse::TransportFailure { id, .. } => *id,
            NetworkResponse::Cancelled { id } => *id,
        }
    }

    pub fn time_ms(&self) -> u64 {
        match self {
            NetworkResponse::Payload { time_ms, .. } => *time_ms,
            NetworkResponse::TransportFailure { time_ms, .. } => *time_ms,
            NetworkResponse::Cancelled { .. } => 0,
        }
    }
}

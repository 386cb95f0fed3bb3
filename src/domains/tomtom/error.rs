//! TomTom error types.

use serde_json::Value;
use thiserror::Error;

/// Result type for TomTom service calls.
pub type TomTomResult<T> = Result<T, TomTomError>;

/// Failure of a TomTom operation, either before or after the network call.
#[derive(Debug, Clone, Error)]
pub enum TomTomError {
    /// Request rejected locally; nothing was sent upstream.
    #[error("{0}")]
    Validation(String),

    /// Upstream or transport failure, already classified.
    #[error(transparent)]
    Api(#[from] ClassifiedError),
}

impl TomTomError {
    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The classified upstream error, if this is one.
    pub fn as_api(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Api(err) => Some(err),
            Self::Validation(_) => None,
        }
    }
}

/// Which flavour of 503 the upstream returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outage {
    /// The gateway reported no healthy upstream for this one service.
    Specific,
    /// Generic unavailability (maintenance, overload).
    Generic,
}

/// Closed set of failure kinds callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    RateLimit,
    ServiceUnavailable(Outage),
    Server,
    Client,
    Network,
    Unexpected,
}

/// A transport or HTTP failure mapped onto [`ErrorKind`].
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,

    /// Actionable, user-facing message.
    pub message: String,

    /// Upstream HTTP status, when a response arrived.
    pub status: Option<u16>,

    /// Error text extracted from the upstream error envelope.
    pub detail: Option<String>,

    /// Raw upstream body (parsed JSON, or a JSON string for non-JSON bodies).
    pub payload: Option<Value>,
}

impl ClassifiedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            detail: None,
            payload: None,
        }
    }

    /// A 400 whose envelope names an unknown traffic model token.
    pub fn is_stale_traffic_model(&self) -> bool {
        self.kind == ErrorKind::Client
            && self.status == Some(400)
            && self
                .detail
                .as_deref()
                .is_some_and(|detail| detail.contains("Unknown TrafficModelId"))
    }
}

//! Tool-specific error types.

use thiserror::Error;

use crate::domains::tomtom::{ClassifiedError, TomTomError};

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Arguments did not deserialize into the tool's parameters.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A guard rejected the request before anything was sent.
    #[error("{0}")]
    Validation(String),

    /// Classified upstream or transport failure.
    #[error(transparent)]
    Api(ClassifiedError),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Whether this failure should be reported inside a tool result
    /// (`isError`) instead of as a protocol error.
    pub fn is_domain_failure(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Api(_))
    }
}

impl From<TomTomError> for ToolError {
    fn from(err: TomTomError) -> Self {
        match err {
            TomTomError::Validation(msg) => Self::Validation(msg),
            TomTomError::Api(classified) => Self::Api(classified),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tomtom::ErrorKind;

    #[test]
    fn test_validation_message_passes_through() {
        let err = ToolError::from(TomTomError::validation("Either bbox or query parameter must be provided"));
        assert_eq!(err.to_string(), "Either bbox or query parameter must be provided");
        assert!(err.is_domain_failure());
    }

    #[test]
    fn test_api_error_keeps_classification() {
        let classified = ClassifiedError::new(ErrorKind::RateLimit, "Rate limit exceeded");
        let err = ToolError::from(TomTomError::Api(classified));
        match &err {
            ToolError::Api(inner) => assert_eq!(inner.kind, ErrorKind::RateLimit),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn test_protocol_errors_are_not_domain_failures() {
        assert!(!ToolError::not_found("tomtom-unknown").is_domain_failure());
        assert!(!ToolError::invalid_arguments("missing field `query`").is_domain_failure());
        assert_eq!(
            ToolError::not_found("tomtom-unknown").to_string(),
            "Tool not found: tomtom-unknown"
        );
    }
}

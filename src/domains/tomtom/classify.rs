//! Translation of transport failures into [`ClassifiedError`]s.

use serde_json::Value;
use tracing::error;

use super::client::TransportFailure;
use super::error::{ClassifiedError, ErrorKind, Outage, TomTomError};

/// Marker the gateway puts in 503 bodies when one backend is down.
const NO_HEALTHY_UPSTREAM: &str = "no healthy upstream";

/// Classifies a transport failure for the operation named by `context`.
pub fn classify(failure: TransportFailure, context: &str) -> TomTomError {
    match failure {
        TransportFailure::MissingApiKey => TomTomError::validation(
            "TomTom API key is not set. Please set TOMTOM_API_KEY environment variable.",
        ),
        TransportFailure::Status { status, body } => {
            let classified = classify_status(status, &body, context);
            error!(
                "{} failed with status {}: {}",
                context,
                status,
                classified.detail.as_deref().unwrap_or_default()
            );
            classified.into()
        }
        TransportFailure::NoResponse(reason) => {
            error!("{} failed: no response ({})", context, reason);
            ClassifiedError::new(
                ErrorKind::Network,
                "No response received from TomTom API server. Please check your internet connection.",
            )
            .into()
        }
        TransportFailure::Other(reason) => {
            error!("{} failed with unexpected error: {}", context, reason);
            ClassifiedError::new(ErrorKind::Unexpected, format!("Unexpected error: {}", reason))
                .into()
        }
    }
}

/// Maps an upstream status and body to exactly one error kind.
pub fn classify_status(status: u16, body: &str, context: &str) -> ClassifiedError {
    let payload = parse_payload(body);
    let detail = upstream_detail(&payload);

    let (kind, message) = match status {
        401 | 403 => (
            ErrorKind::Auth,
            format!(
                "Authentication error: Your TomTom API key may be invalid, expired, or missing \
                 permissions for this request. Status: {}",
                status
            ),
        ),
        429 => (
            ErrorKind::RateLimit,
            format!(
                "Rate limit exceeded: You've made too many requests to the TomTom API. \
                 Please try again later. Status: {}",
                status
            ),
        ),
        503 if detail.contains(NO_HEALTHY_UPSTREAM) => (
            ErrorKind::ServiceUnavailable(Outage::Specific),
            format!(
                "TomTom service temporarily unavailable: This specific service ({}) is \
                 experiencing an outage. This is a TomTom server issue, not an issue with your \
                 API key or implementation. Please try again in a few minutes, or check the \
                 TomTom status page for service updates. Other TomTom services like search \
                 might still be available. Status: {}",
                context, status
            ),
        ),
        503 => (
            ErrorKind::ServiceUnavailable(Outage::Generic),
            format!(
                "TomTom service unavailable: The service might be temporarily down or \
                 undergoing maintenance. Please try again later. Status: {}",
                status
            ),
        ),
        500..=599 => (
            ErrorKind::Server,
            format!(
                "TomTom server error: The service encountered an internal error. This is likely \
                 a temporary issue on TomTom's side. Please try again in a few minutes. \
                 Status: {}",
                status
            ),
        ),
        _ => (
            ErrorKind::Client,
            format!("API error: {} - {}", status, detail),
        ),
    };

    ClassifiedError {
        kind,
        message,
        status: Some(status),
        detail: Some(detail),
        payload: Some(payload),
    }
}

/// Non-JSON bodies are kept verbatim as a JSON string.
fn parse_payload(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Prefers `detailedError {code, message}`, then a flat `error` string,
/// then the serialized body.
fn upstream_detail(payload: &Value) -> String {
    match payload {
        Value::Object(fields) => {
            if let Some(detailed) = fields.get("detailedError").filter(|d| d.is_object()) {
                let code = detailed.get("code").and_then(Value::as_str).unwrap_or_default();
                let message = detailed
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                format!("{}: {}", code, message)
            } else if let Some(error) = fields.get("error").and_then(Value::as_str) {
                error.to_string()
            } else {
                payload.to_string()
            }
        }
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses() {
        for status in [401, 403] {
            let err = classify_status(status, "{}", "geocode");
            assert_eq!(err.kind, ErrorKind::Auth);
            assert!(err.message.contains("API key may be invalid"));
            assert_eq!(err.status, Some(status));
        }
    }

    #[test]
    fn test_rate_limit() {
        let err = classify_status(429, "", "search");
        assert_eq!(err.kind, ErrorKind::RateLimit);
        assert!(err.message.contains("Please try again later"));
    }

    #[test]
    fn test_no_healthy_upstream_is_specific_outage() {
        let err = classify_status(503, r#"{"error":"no healthy upstream"}"#, "traffic incidents");
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable(Outage::Specific));
        assert!(err.message.contains("(traffic incidents)"));
        assert!(err.message.contains("might still be available"));
    }

    #[test]
    fn test_plain_text_no_healthy_upstream() {
        let err = classify_status(503, "no healthy upstream", "routing");
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable(Outage::Specific));
        assert_eq!(err.payload, Some(Value::String("no healthy upstream".into())));
    }

    #[test]
    fn test_generic_503() {
        let err = classify_status(503, r#"{"error":"maintenance"}"#, "routing");
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable(Outage::Generic));
        assert!(err.message.contains("maintenance"));
    }

    #[test]
    fn test_other_5xx_is_server_error() {
        for status in [500, 502, 504, 599] {
            assert_eq!(classify_status(status, "", "x").kind, ErrorKind::Server);
        }
    }

    #[test]
    fn test_client_error_prefers_detailed_error() {
        let body = r#"{"detailedError":{"code":"InvalidRequest","message":"Unknown TrafficModelId"},"error":"ignored"}"#;
        let err = classify_status(400, body, "traffic incidents");
        assert_eq!(err.kind, ErrorKind::Client);
        assert_eq!(err.message, "API error: 400 - InvalidRequest: Unknown TrafficModelId");
        assert!(err.is_stale_traffic_model());
    }

    #[test]
    fn test_client_error_flat_error_field() {
        let err = classify_status(404, r#"{"error":"Not found"}"#, "x");
        assert_eq!(err.message, "API error: 404 - Not found");
        assert!(!err.is_stale_traffic_model());
    }

    #[test]
    fn test_client_error_serializes_unknown_envelope() {
        let err = classify_status(400, r#"{"errorText":"bad"}"#, "x");
        assert_eq!(err.message, r#"API error: 400 - {"errorText":"bad"}"#);
    }

    #[test]
    fn test_unclassified_status_is_client_error() {
        for status in [302, 418, 600, 0] {
            assert_eq!(classify_status(status, "", "x").kind, ErrorKind::Client);
        }
    }

    #[test]
    fn test_stale_model_needs_status_400() {
        let body = r#"{"detailedError":{"code":"X","message":"Unknown TrafficModelId"}}"#;
        assert!(!classify_status(404, body, "x").is_stale_traffic_model());
    }

    #[test]
    fn test_missing_key_is_validation() {
        let err = classify(TransportFailure::MissingApiKey, "geocode");
        assert!(matches!(err, TomTomError::Validation(_)));
        assert!(err.to_string().contains("TOMTOM_API_KEY"));
    }

    #[test]
    fn test_no_response_is_network_error() {
        let err = classify(TransportFailure::NoResponse("timed out".into()), "geocode");
        let api = err.as_api().unwrap();
        assert_eq!(api.kind, ErrorKind::Network);
        assert!(api.status.is_none());
        assert!(api.message.contains("check your internet connection"));
    }

    #[test]
    fn test_other_failure_is_unexpected() {
        let err = classify(TransportFailure::Other("bad json".into()), "geocode");
        assert_eq!(err.as_api().unwrap().kind, ErrorKind::Unexpected);
        assert_eq!(err.to_string(), "Unexpected error: bad json");
    }
}

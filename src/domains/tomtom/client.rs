//! HTTP adapter for the TomTom REST API.
//!
//! Every request goes through one configured [`TomTomClient`]: base URL,
//! per-call API key lookup, the `TomTom-User-Agent` header and the
//! repeated-key rule for list parameters live here and nowhere else.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::params::ParamMap;
use crate::core::config::TomTomConfig;

/// Per-family API versions.
pub mod api_version {
    pub const SEARCH: u8 = 2;
    pub const ROUTING: u8 = 1;
    pub const TRAFFIC: u8 = 5;
    pub const MAP: u8 = 1;
}

/// Header name the TomTom API uses for SDK identification.
pub const USER_AGENT_HEADER: &str = "TomTom-User-Agent";

/// Raw failure from the transport, before classification.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportFailure {
    /// No API key available; nothing was sent.
    MissingApiKey,
    /// The upstream answered with a non-success status.
    Status { status: u16, body: String },
    /// The request was sent but no response arrived.
    NoResponse(String),
    /// Anything else (URL building, body decoding, ...).
    Other(String),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            Self::NoResponse(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

/// Binary response body, used for static map images.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Outbound seam for all TomTom calls.
#[async_trait]
pub trait TomTomApi: Send + Sync {
    /// GET `path` with `params` and decode the JSON body.
    async fn get_json(&self, path: &str, params: &ParamMap) -> Result<Value, TransportFailure>;

    /// GET `path` with `params` and return the raw body.
    async fn get_binary(&self, path: &str, params: &ParamMap) -> Result<Binary, TransportFailure>;
}

/// Shared handle used by tools and routes.
pub type SharedApi = Arc<dyn TomTomApi>;

/// Returns the API key for the next request, if any.
pub type KeySource = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Key source reading `var` from the process environment on every call.
pub fn env_key_source(var: impl Into<String>) -> KeySource {
    let var = var.into();
    Arc::new(move || std::env::var(&var).ok().filter(|key| !key.is_empty()))
}

/// `reqwest`-backed [`TomTomApi`].
#[derive(Clone)]
pub struct TomTomClient {
    http: reqwest::Client,
    base_url: String,
    user_agent: String,
    key_source: KeySource,
}

impl TomTomClient {
    /// Create a client from configuration. The key is not read here.
    pub fn new(config: &TomTomConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        });

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            key_source: env_key_source(config.api_key_var.clone()),
        }
    }

    /// Replace the key source (tests, secret managers).
    pub fn with_key_source(mut self, key_source: KeySource) -> Self {
        self.key_source = key_source;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL with the key as the first query parameter.
    pub fn request_url(
        &self,
        path: &str,
        params: &ParamMap,
        key: &str,
    ) -> Result<String, TransportFailure> {
        let mut pairs = vec![("key".to_string(), key.to_string())];
        pairs.extend(params.to_query_pairs());
        let query =
            serde_urlencoded::to_string(&pairs).map_err(|e| TransportFailure::Other(e.to_string()))?;
        Ok(format!("{}{}?{}", self.base_url, path, query))
    }

    async fn send(&self, path: &str, params: &ParamMap) -> Result<reqwest::Response, TransportFailure> {
        let key = (self.key_source)().ok_or(TransportFailure::MissingApiKey)?;
        let url = self.request_url(path, params, &key)?;
        debug!("GET {} with {} parameter(s)", path, params.len());

        let response = self
            .http
            .get(&url)
            .header(USER_AGENT_HEADER, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportFailure::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl TomTomApi for TomTomClient {
    async fn get_json(&self, path: &str, params: &ParamMap) -> Result<Value, TransportFailure> {
        let response = self.send(path, params).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| TransportFailure::Other(format!("Invalid JSON response: {}", e)))
    }

    async fn get_binary(&self, path: &str, params: &ParamMap) -> Result<Binary, TransportFailure> {
        let response = self.send(path, params).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        Ok(Binary {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

/// Startup check: logs whether a key is configured, never fails.
pub fn log_api_key_status(config: &TomTomConfig) {
    if (env_key_source(config.api_key_var.clone()))().is_some() {
        info!("TomTom API key found in {}", config.api_key_var);
    } else {
        error!("{} environment variable is not set", config.api_key_var);
        warn!("Server will start but API calls will fail until a valid key is provided");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tomtom::params::ParamValue;

    fn test_client() -> TomTomClient {
        let config = TomTomConfig {
            base_url: "http://127.0.0.1:9/".to_string(),
            ..TomTomConfig::default()
        };
        TomTomClient::new(&config)
    }

    #[test]
    fn test_request_url_puts_key_first_and_repeats_lists() {
        let client = test_client();
        let mut params = ParamMap::new();
        params.insert("avoid", ParamValue::List(vec!["tollRoads".into(), "ferries".into()]));
        params.insert("language", "en-US");

        let url = client
            .request_url("/routing/1/calculateRoute/1,2:3,4/json", &params, "abc")
            .unwrap();
        assert_eq!(
            url,
            "http://127.0.0.1:9/routing/1/calculateRoute/1,2:3,4/json?key=abc&avoid=tollRoads&avoid=ferries&language=en-US"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(test_client().base_url(), "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_sending() {
        let client = test_client().with_key_source(Arc::new(|| None));
        let result = client.get_json("/search/2/search/x.json", &ParamMap::new()).await;
        assert_eq!(result, Err(TransportFailure::MissingApiKey));
    }

    #[test]
    fn test_key_source_is_read_per_call() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let source: KeySource = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some("rotated".to_string())
        });
        let client = test_client().with_key_source(source);

        assert_eq!((client.key_source)().as_deref(), Some("rotated"));
        assert_eq!((client.key_source)().as_deref(), Some("rotated"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

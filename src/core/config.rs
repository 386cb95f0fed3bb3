//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default TomTom API host.
pub const DEFAULT_TOMTOM_BASE_URL: &str = "https://api.tomtom.com";

/// Environment variable holding the TomTom API key.
pub const DEFAULT_API_KEY_VAR: &str = "TOMTOM_API_KEY";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// TomTom API access.
    pub tomtom: TomTomConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// TomTom API client settings.
///
/// The API key itself is never stored here: only the name of the variable
/// it is read from, on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomTomConfig {
    /// Base URL of the TomTom API, without trailing slash.
    pub base_url: String,

    /// Environment variable the API key is read from.
    pub api_key_var: String,

    /// Request timeout in seconds; `None` leaves the client default.
    pub timeout_secs: Option<u64>,

    /// Value of the `TomTom-User-Agent` header.
    pub user_agent: String,
}

impl Default for TomTomConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TOMTOM_BASE_URL.to_string(),
            api_key_var: DEFAULT_API_KEY_VAR.to_string(),
            timeout_secs: None,
            user_agent: format!("TomTomMCPSDK/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TomTomConfig {
    /// Load the TomTom section from `TOMTOM_*` variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("TOMTOM_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("TOMTOM_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.timeout_secs = Some(secs),
                Err(_) => warn!("Ignoring invalid TOMTOM_TIMEOUT_SECS: {}", timeout),
            }
        }

        info!("TomTom API base URL: {}", config.base_url);
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "tomtom-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            tomtom: TomTomConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables (and `.env`).
    ///
    /// Server settings use the `MCP_` prefix, TomTom settings `TOMTOM_`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();
        config.tomtom = TomTomConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_tomtom_defaults() {
        let config = TomTomConfig::default();
        assert_eq!(config.base_url, "https://api.tomtom.com");
        assert_eq!(config.api_key_var, "TOMTOM_API_KEY");
        assert!(config.timeout_secs.is_none());
        assert!(config.user_agent.starts_with("TomTomMCPSDK/"));
    }

    #[test]
    fn test_tomtom_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOMTOM_BASE_URL", "http://localhost:8089");
            std::env::set_var("TOMTOM_TIMEOUT_SECS", "15");
        }
        let config = TomTomConfig::from_env();
        assert_eq!(config.base_url, "http://localhost:8089");
        assert_eq!(config.timeout_secs, Some(15));
        unsafe {
            std::env::remove_var("TOMTOM_BASE_URL");
            std::env::remove_var("TOMTOM_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_invalid_timeout_ignored() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOMTOM_TIMEOUT_SECS", "soon");
        }
        assert!(TomTomConfig::from_env().timeout_secs.is_none());
        unsafe {
            std::env::remove_var("TOMTOM_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_api_key_never_in_debug_output() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOMTOM_API_KEY", "super_secret_key");
        }
        let debug_str = format!("{:?}", Config::from_env());
        assert!(!debug_str.contains("super_secret_key"));
        assert!(debug_str.contains("TOMTOM_API_KEY"));
        unsafe {
            std::env::remove_var("TOMTOM_API_KEY");
        }
    }
}

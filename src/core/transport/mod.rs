//! Transports the MCP server can run on.
//!
//! - **STDIO** (feature `stdio`, default): one client on stdin/stdout
//! - **TCP** (feature `tcp`): line-delimited JSON-RPC, one session per connection
//! - **HTTP** (feature `http`): tools-only JSON-RPC over POST via axum
//!
//! STDIO and TCP hand the connection to rmcp, which routes tool calls
//! through the server's `ToolRouter`. HTTP dispatches through
//! `ToolRegistry` instead. Either way every session shares the server's
//! TomTom API handle.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

// Re-export configs for convenience
#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;

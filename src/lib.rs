//! TomTom MCP Server Library
//!
//! Exposes TomTom search, routing, traffic and map APIs as Model Context
//! Protocol tools.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tomtom**: parameter builders, validation guards, HTTP adapter and
//!     error classification
//!   - **tools**: MCP tools that clients call
//!
//! # Example
//!
//! ```rust,no_run
//! use tomtom_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};

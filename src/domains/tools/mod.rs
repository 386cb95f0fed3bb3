//! Tools domain module.
//!
//! MCP tools exposing the TomTom location services. Each tool is a thin
//! handler: deserialize arguments, call the matching service in
//! [`crate::domains::tomtom`], wrap the outcome in a result envelope.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file under `definitions/`
//! 2. Define params, execute(), http_handler(), to_tool() and create_route()
//! 3. Export it from the family's `mod.rs` and `definitions/mod.rs`
//! 4. Add the route in `router.rs` and the dispatch arm in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;

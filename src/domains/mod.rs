//! Domains module containing business logic organized by bounded contexts.
//!
//! - `tomtom`: request builders, guards, transport adapter and error
//!   classification for the TomTom APIs
//! - `tools`: MCP tool definitions on top of the TomTom services

pub mod tomtom;
pub mod tools;

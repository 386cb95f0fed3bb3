//! Map display tools.

pub mod static_map;

pub use static_map::{StaticMapParams, StaticMapTool};

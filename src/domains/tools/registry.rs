//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::domains::tomtom::SharedApi;

use super::definitions::{
    FuzzySearchTool, GeocodeTool, NearbySearchTool, PoiSearchTool, ReachableRangeTool,
    ReverseGeocodeTool, RouteTool, StaticMapTool, TrafficIncidentsTool, WaypointRouteTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - every tool shares one TomTom API handle.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    api: SharedApi,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(api: SharedApi) -> Self {
        Self { api }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GeocodeTool::NAME,
            ReverseGeocodeTool::NAME,
            FuzzySearchTool::NAME,
            PoiSearchTool::NAME,
            NearbySearchTool::NAME,
            RouteTool::NAME,
            WaypointRouteTool::NAME,
            ReachableRangeTool::NAME,
            TrafficIncidentsTool::NAME,
            StaticMapTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            GeocodeTool::to_tool(),
            ReverseGeocodeTool::to_tool(),
            FuzzySearchTool::to_tool(),
            PoiSearchTool::to_tool(),
            NearbySearchTool::to_tool(),
            RouteTool::to_tool(),
            WaypointRouteTool::to_tool(),
            ReachableRangeTool::to_tool(),
            TrafficIncidentsTool::to_tool(),
            StaticMapTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// Domain failures come back as `Ok` results with `isError` set; `Err`
    /// is reserved for unknown tools and undeserializable arguments.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let api = self.api.clone();
        match name {
            GeocodeTool::NAME => GeocodeTool::http_handler(arguments, api).await,
            ReverseGeocodeTool::NAME => ReverseGeocodeTool::http_handler(arguments, api).await,
            FuzzySearchTool::NAME => FuzzySearchTool::http_handler(arguments, api).await,
            PoiSearchTool::NAME => PoiSearchTool::http_handler(arguments, api).await,
            NearbySearchTool::NAME => NearbySearchTool::http_handler(arguments, api).await,
            RouteTool::NAME => RouteTool::http_handler(arguments, api).await,
            WaypointRouteTool::NAME => WaypointRouteTool::http_handler(arguments, api).await,
            ReachableRangeTool::NAME => ReachableRangeTool::http_handler(arguments, api).await,
            TrafficIncidentsTool::NAME => TrafficIncidentsTool::http_handler(arguments, api).await,
            StaticMapTool::NAME => StaticMapTool::http_handler(arguments, api).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(super::ToolError::not_found(name).to_string())
            }
        }
    }
}

//! Tool definitions module.
//!
//! One file per tool, grouped by TomTom API family. Each tool owns its
//! parameter struct, `execute()`, `http_handler()`, `to_tool()` and
//! `create_route()`.

pub mod common;
pub mod map;
pub mod routing;
pub mod search;
pub mod traffic;

pub use map::{StaticMapParams, StaticMapTool};
pub use routing::{
    ReachableRangeParams, ReachableRangeTool, RouteParams, RouteTool, WaypointRouteParams,
    WaypointRouteTool,
};
pub use search::{
    FuzzySearchParams, FuzzySearchTool, GeocodeParams, GeocodeTool, NearbySearchParams,
    NearbySearchTool, PoiSearchParams, PoiSearchTool, ReverseGeocodeParams, ReverseGeocodeTool,
};
pub use traffic::{TrafficIncidentsParams, TrafficIncidentsTool};

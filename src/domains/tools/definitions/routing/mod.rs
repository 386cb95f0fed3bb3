//! Routing tools.

pub mod reachable_range;
pub mod route;
pub mod waypoint_route;

pub use reachable_range::{ReachableRangeParams, ReachableRangeTool};
pub use route::{RouteParams, RouteTool};
pub use waypoint_route::{WaypointRouteParams, WaypointRouteTool};

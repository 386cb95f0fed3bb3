//! Tool Router - builds the rmcp ToolRouter for STDIO/TCP transport.
//!
//! Each tool knows how to create its own route; they all share one API handle.

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::tomtom::SharedApi;

use super::definitions::{
    FuzzySearchTool, GeocodeTool, NearbySearchTool, PoiSearchTool, ReachableRangeTool,
    ReverseGeocodeTool, RouteTool, StaticMapTool, TrafficIncidentsTool, WaypointRouteTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(api: SharedApi) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GeocodeTool::create_route(api.clone()))
        .with_route(ReverseGeocodeTool::create_route(api.clone()))
        .with_route(FuzzySearchTool::create_route(api.clone()))
        .with_route(PoiSearchTool::create_route(api.clone()))
        .with_route(NearbySearchTool::create_route(api.clone()))
        .with_route(RouteTool::create_route(api.clone()))
        .with_route(WaypointRouteTool::create_route(api.clone()))
        .with_route(ReachableRangeTool::create_route(api.clone()))
        .with_route(TrafficIncidentsTool::create_route(api.clone()))
        .with_route(StaticMapTool::create_route(api))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::tomtom::mock::MockApi;
    use std::sync::Arc;

    struct TestServer {}

    fn test_api() -> SharedApi {
        Arc::new(MockApi::default())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_api());
        let tools = router.list_all();
        assert_eq!(tools.len(), 10);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"tomtom-geocode"));
        assert!(names.contains(&"tomtom-routing"));
        assert!(names.contains(&"tomtom-traffic"));
        assert!(names.contains(&"tomtom-static-map"));
    }

    #[test]
    fn test_registry_matches_router() {
        let api = test_api();
        let registry = ToolRegistry::new(api.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(api);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}

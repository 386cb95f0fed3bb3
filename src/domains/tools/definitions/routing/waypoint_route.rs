//! Multi-waypoint routing tool.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tomtom::routing::{self, RouteOptions};
use crate::domains::tomtom::{Coordinate, SharedApi, TomTomApi};
use crate::domains::tools::definitions::common::{parse_args, tool_result};

/// Parameters for the waypoint routing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WaypointRouteParams {
    /// Ordered stops, origin first and destination last (at least two)
    pub waypoints: Vec<Coordinate>,

    #[serde(flatten)]
    pub options: RouteOptions,
}

pub struct WaypointRouteTool;

impl WaypointRouteTool {
    pub const NAME: &'static str = "tomtom-waypoint-routing";

    pub const DESCRIPTION: &'static str = "Calculate a route through multiple stops in order. Set computeBestOrder to let TomTom reorder the intermediate stops. Accepts the same route and vehicle options as tomtom-routing.";

    #[instrument(skip_all, fields(waypoints = params.waypoints.len()))]
    pub async fn execute(params: &WaypointRouteParams, api: &dyn TomTomApi) -> CallToolResult {
        info!("Waypoint routing called");
        let outcome =
            routing::get_multi_waypoint_route(api, &params.waypoints, &params.options).await;
        tool_result(Self::NAME, outcome)
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: SharedApi,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_args};

        let params: WaypointRouteParams = parse_http_args(arguments)?;
        Ok(http_response(Self::execute(&params, api.as_ref()).await))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<WaypointRouteParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(api: SharedApi) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let api = api.clone();
            async move {
                let params: WaypointRouteParams = parse_args(args)?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tomtom::mock::MockApi;
    use crate::domains::tomtom::params::ParamValue;
    use crate::domains::tools::definitions::common::testing::{is_error, json_of};
    use serde_json::json;

    #[tokio::test]
    async fn test_single_waypoint_is_rejected_before_transport() {
        let api = MockApi::with_json(json!({}));
        let params: WaypointRouteParams =
            serde_json::from_value(json!({ "waypoints": [{ "lat": 52.0, "lon": 4.0 }] })).unwrap();

        let result = WaypointRouteTool::execute(&params, &api).await;
        assert!(is_error(&result));
        assert_eq!(
            json_of(&result),
            json!({ "error": "At least two waypoints (origin and destination) are required" })
        );
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_waypoints_joined_in_order() {
        let api = MockApi::with_json(json!({ "routes": [] }));
        let params: WaypointRouteParams = serde_json::from_value(json!({
            "waypoints": [
                { "lat": 52.37, "lon": 4.89 },
                { "lat": 52.09, "lon": 5.12 },
                { "lat": 51.92, "lon": 4.48 }
            ],
            "computeBestOrder": false
        }))
        .unwrap();

        let result = WaypointRouteTool::execute(&params, &api).await;
        assert!(!is_error(&result));
        let call = api.last_call().unwrap();
        assert_eq!(
            call.path,
            "/routing/1/calculateRoute/52.37,4.89:52.09,5.12:51.92,4.48/json"
        );
        assert_eq!(call.params.get("computeBestOrder"), Some(&ParamValue::Bool(false)));
    }
}

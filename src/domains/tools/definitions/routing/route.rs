//! Routing tool: a route between two points.

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

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the routing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RouteParams {
    /// Starting point
    pub origin: Coordinate,

    /// End point
    pub destination: Coordinate,

    /// Route type, travel mode, traffic, avoidances and vehicle profile.
    #[serde(flatten)]
    pub options: RouteOptions,
}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct RouteTool;

impl RouteTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "tomtom-routing";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Calculate a route between an origin and a destination. Supports route types (fastest, shortest, eco, thrilling), travel modes, real-time traffic, departure or arrival times, avoidances and detailed vehicle and EV consumption profiles. Returns distance, travel time and the route geometry.";

    #[instrument(skip_all, fields(origin = %params.origin, destination = %params.destination))]
    pub async fn execute(params: &RouteParams, api: &dyn TomTomApi) -> CallToolResult {
        info!("Routing tool called");
        let outcome =
            routing::get_route(api, params.origin, params.destination, &params.options).await;
        tool_result(Self::NAME, outcome)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: SharedApi,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_args};

        let params: RouteParams = parse_http_args(arguments)?;
        Ok(http_response(Self::execute(&params, api.as_ref()).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RouteParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(api: SharedApi) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let api = api.clone();
            async move {
                let params: RouteParams = parse_args(args)?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tomtom::client::TransportFailure;
    use crate::domains::tomtom::mock::MockApi;
    use crate::domains::tomtom::params::ParamValue;
    use crate::domains::tools::definitions::common::testing::{is_error, json_of};
    use serde_json::json;

    fn amsterdam_to_rotterdam() -> serde_json::Value {
        json!({
            "origin": { "lat": 52.3731, "lon": 4.8922 },
            "destination": { "lat": 51.9225, "lon": 4.4792 }
        })
    }

    #[tokio::test]
    async fn test_route_request_shape() {
        let api = MockApi::with_json(json!({ "routes": [] }));
        let mut args = amsterdam_to_rotterdam();
        args["travelMode"] = json!("truck");
        args["vehicleWeight"] = json!(12000);
        args["avoid"] = json!(["tollRoads", "ferries"]);
        let params: RouteParams = serde_json::from_value(args).unwrap();

        let result = RouteTool::execute(&params, &api).await;
        assert!(!is_error(&result));

        let call = api.last_call().unwrap();
        assert_eq!(
            call.path,
            "/routing/1/calculateRoute/52.3731,4.8922:51.9225,4.4792/json"
        );
        assert_eq!(
            call.params.get("routeType"),
            Some(&ParamValue::Text("fastest".to_string()))
        );
        assert_eq!(
            call.params.get("travelMode"),
            Some(&ParamValue::Text("truck".to_string()))
        );
        assert_eq!(call.params.get("vehicleWeight"), Some(&ParamValue::Float(12000.0)));
        assert_eq!(
            call.params.get("avoid"),
            Some(&ParamValue::List(vec![
                "tollRoads".to_string(),
                "ferries".to_string()
            ]))
        );
    }

    #[tokio::test]
    async fn test_specific_outage_names_service() {
        let api = MockApi::failing(TransportFailure::Status {
            status: 503,
            body: r#"{"error":"no healthy upstream"}"#.to_string(),
        });
        let params: RouteParams = serde_json::from_value(amsterdam_to_rotterdam()).unwrap();

        let result = RouteTool::execute(&params, &api).await;
        assert!(is_error(&result));
        let message = json_of(&result)["error"].as_str().unwrap().to_string();
        assert!(message.contains("routing"));
        assert!(message.contains("Other TomTom services"));
    }

    #[test]
    fn test_missing_destination_is_invalid() {
        let args = json!({ "origin": { "lat": 52.0, "lon": 4.0 } });
        assert!(parse_args::<RouteParams>(args.as_object().unwrap().clone()).is_err());
    }
}

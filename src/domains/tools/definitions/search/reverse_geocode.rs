//! Reverse geocoding tool: coordinates to the nearest address.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tomtom::search::{self, ReverseGeocodeOptions};
use crate::domains::tomtom::{Coordinate, SharedApi, TomTomApi};
use crate::domains::tools::definitions::common::{parse_args, tool_result};

/// Parameters for the reverse geocode tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReverseGeocodeParams {
    /// Latitude (-90 to +90)
    pub lat: f64,

    /// Longitude (-180 to +180)
    pub lon: f64,

    #[serde(flatten)]
    pub options: ReverseGeocodeOptions,
}

pub struct ReverseGeocodeTool;

impl ReverseGeocodeTool {
    pub const NAME: &'static str = "tomtom-reverse-geocode";

    pub const DESCRIPTION: &'static str = "Convert coordinates to a street address. Use for GPS positions or map clicks. Returns the closest addresses within radius meters (default 100 m, 5 results), optionally with speed limits and road use.";

    #[instrument(skip_all, fields(lat = params.lat, lon = params.lon))]
    pub async fn execute(params: &ReverseGeocodeParams, api: &dyn TomTomApi) -> CallToolResult {
        info!("Reverse geocode called");
        let position = Coordinate::new(params.lat, params.lon);
        let outcome = search::reverse_geocode(api, position, &params.options).await;
        tool_result(Self::NAME, outcome)
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: SharedApi,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_args};

        let params: ReverseGeocodeParams = parse_http_args(arguments)?;
        Ok(http_response(Self::execute(&params, api.as_ref()).await))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ReverseGeocodeParams>(),
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
                let params: ReverseGeocodeParams = parse_args(args)?;
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
    async fn test_reverse_geocode_defaults() {
        let body = json!({ "addresses": [{ "address": { "freeformAddress": "Dam 1, Amsterdam" } }] });
        let api = MockApi::with_json(body.clone());
        let params: ReverseGeocodeParams =
            serde_json::from_value(json!({ "lat": 52.3731, "lon": 4.8922 })).unwrap();

        let result = ReverseGeocodeTool::execute(&params, &api).await;
        assert_eq!(json_of(&result), body);

        let call = api.last_call().unwrap();
        assert_eq!(call.path, "/search/2/reverseGeocode/52.3731,4.8922.json");
        assert_eq!(call.params.get("radius"), Some(&ParamValue::Float(100.0)));
        assert_eq!(call.params.get("limit"), Some(&ParamValue::Int(5)));
    }

    #[tokio::test]
    async fn test_road_use_list_is_joined() {
        let api = MockApi::with_json(json!({}));
        let params: ReverseGeocodeParams = serde_json::from_value(json!({
            "lat": 52.0,
            "lon": 5.0,
            "returnRoadUse": true,
            "roadUse": ["Arterial", "Ramp"]
        }))
        .unwrap();

        let result = ReverseGeocodeTool::execute(&params, &api).await;
        assert!(!is_error(&result));
        let call = api.last_call().unwrap();
        assert_eq!(
            call.params.get("roadUse"),
            Some(&ParamValue::Text("Arterial,Ramp".to_string()))
        );
    }
}

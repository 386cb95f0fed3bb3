//! Nearby search tool: points of interest around a coordinate.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tomtom::search::{self, SearchOptions};
use crate::domains::tomtom::{Coordinate, SharedApi, TomTomApi};
use crate::domains::tools::definitions::common::{parse_args, tool_result};

/// Parameters for the nearby search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NearbySearchParams {
    /// Other search options; `radius` defaults to 1000 m and `limit` to 20.
    #[serde(flatten)]
    pub options: SearchOptions,

    // Declared after the flattened options so the schema keeps these
    // required center properties over the optional bias ones.
    /// Latitude of the search center (-90 to +90)
    pub lat: f64,

    /// Longitude of the search center (-180 to +180)
    pub lon: f64,
}

impl NearbySearchParams {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

pub struct NearbySearchTool;

impl NearbySearchTool {
    pub const NAME: &'static str = "tomtom-nearby";

    pub const DESCRIPTION: &'static str = "Discover places around a location, optionally filtered by category (categorySet, e.g. '7315' restaurants, '9663' EV charging). Searches within radius meters of lat/lon (default 1000 m, 20 results).";

    #[instrument(skip_all, fields(lat = params.lat, lon = params.lon))]
    pub async fn execute(params: &NearbySearchParams, api: &dyn TomTomApi) -> CallToolResult {
        info!("Nearby search called");
        let outcome = search::nearby_search(api, params.center(), &params.options).await;
        tool_result(Self::NAME, outcome)
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: SharedApi,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_args};

        let params: NearbySearchParams = parse_http_args(arguments)?;
        Ok(http_response(Self::execute(&params, api.as_ref()).await))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NearbySearchParams>(),
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
                let params: NearbySearchParams = parse_args(args)?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

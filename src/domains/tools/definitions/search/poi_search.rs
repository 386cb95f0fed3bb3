//! POI search tool: businesses and points of interest by name or category.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tomtom::search::{self, SearchOptions};
use crate::domains::tomtom::{SharedApi, TomTomApi};
use crate::domains::tools::definitions::common::{parse_args, tool_result};

/// Parameters for the POI search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PoiSearchParams {
    /// POI name or category text, e.g. 'Starbucks' or 'gas station'
    pub query: String,

    #[serde(flatten)]
    pub options: SearchOptions,
}

pub struct PoiSearchTool;

impl PoiSearchTool {
    pub const NAME: &'static str = "tomtom-poi-search";

    pub const DESCRIPTION: &'static str = "Find specific businesses or points of interest by name or type. Filter with categorySet, brandSet, connectorSet or fuelSet, and bias results with lat/lon/radius. Returns POI details including address, position and categories.";

    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(params: &PoiSearchParams, api: &dyn TomTomApi) -> CallToolResult {
        info!("POI search called");
        let outcome = search::poi_search(api, &params.query, &params.options).await;
        tool_result(Self::NAME, outcome)
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: SharedApi,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_args};

        let params: PoiSearchParams = parse_http_args(arguments)?;
        Ok(http_response(Self::execute(&params, api.as_ref()).await))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<PoiSearchParams>(),
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
                let params: PoiSearchParams = parse_args(args)?;
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
    use crate::domains::tools::definitions::common::testing::is_error;
    use serde_json::json;

    #[tokio::test]
    async fn test_category_filters_reach_the_request() {
        let api = MockApi::with_json(json!({ "results": [] }));
        let params: PoiSearchParams = serde_json::from_value(json!({
            "query": "charging",
            "categorySet": "7309",
            "minPowerKW": 50,
            "lat": 52.37,
            "lon": 4.89,
            "radius": 2000
        }))
        .unwrap();

        let result = PoiSearchTool::execute(&params, &api).await;
        assert!(!is_error(&result));

        let call = api.last_call().unwrap();
        assert_eq!(call.path, "/search/2/poiSearch/charging.json");
        assert_eq!(
            call.params.get("categorySet"),
            Some(&ParamValue::Text("7309".to_string()))
        );
        assert_eq!(call.params.get("minPowerKW"), Some(&ParamValue::Float(50.0)));
        assert_eq!(call.params.get("radius"), Some(&ParamValue::Float(2000.0)));
    }

    #[test]
    fn test_missing_query_is_rejected() {
        let args = json!({ "categorySet": "7315" });
        let err = parse_args::<PoiSearchParams>(args.as_object().unwrap().clone()).unwrap_err();
        assert!(err.message.contains("query"));
    }
}

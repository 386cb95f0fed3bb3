//! Fuzzy search tool: free-form text over addresses, POIs and places.

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

/// Parameters for the fuzzy search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FuzzySearchParams {
    /// Free-form search text: an address, a place name or a business
    pub query: String,

    #[serde(flatten)]
    pub options: SearchOptions,
}

pub struct FuzzySearchTool;

impl FuzzySearchTool {
    pub const NAME: &'static str = "tomtom-fuzzy-search";

    pub const DESCRIPTION: &'static str = "Typo-tolerant search for addresses, points of interest and geographies. Use when the query is ambiguous or mixes address and business text. Supports location bias (lat/lon/radius), country filters and category filters.";

    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(params: &FuzzySearchParams, api: &dyn TomTomApi) -> CallToolResult {
        info!("Fuzzy search called");
        let outcome = search::fuzzy_search(api, &params.query, &params.options).await;
        tool_result(Self::NAME, outcome)
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: SharedApi,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_args};

        let params: FuzzySearchParams = parse_http_args(arguments)?;
        Ok(http_response(Self::execute(&params, api.as_ref()).await))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FuzzySearchParams>(),
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
                let params: FuzzySearchParams = parse_args(args)?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

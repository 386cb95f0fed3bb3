//! Reachable range tool: the area reachable from a point within a budget.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tomtom::routing::{self, ReachableRangeOptions};
use crate::domains::tomtom::{Coordinate, SharedApi, TomTomApi};
use crate::domains::tools::definitions::common::{parse_args, tool_result};

/// Parameters for the reachable range tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReachableRangeParams {
    /// Starting point
    pub origin: Coordinate,

    /// Budgets (at least one of time, distance, energy or fuel) and vehicle profile.
    #[serde(flatten)]
    pub options: ReachableRangeOptions,
}

pub struct ReachableRangeTool;

impl ReachableRangeTool {
    pub const NAME: &'static str = "tomtom-reachable-range";

    pub const DESCRIPTION: &'static str = "Calculate the area reachable from an origin within a time, distance, energy or fuel budget (isochrone). Provide at least one budget. Returns the polygon boundary of the reachable range.";

    #[instrument(skip_all, fields(origin = %params.origin))]
    pub async fn execute(params: &ReachableRangeParams, api: &dyn TomTomApi) -> CallToolResult {
        info!("Reachable range called");
        let outcome = routing::get_reachable_range(api, params.origin, &params.options).await;
        tool_result(Self::NAME, outcome)
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: SharedApi,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_args};

        let params: ReachableRangeParams = parse_http_args(arguments)?;
        Ok(http_response(Self::execute(&params, api.as_ref()).await))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ReachableRangeParams>(),
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
                let params: ReachableRangeParams = parse_args(args)?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

//! Geocoding tool: address text to coordinates.

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

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the geocode tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GeocodeParams {
    /// Full or partial address, e.g. 'Dam Square, Amsterdam'
    pub query: String,

    #[serde(flatten)]
    pub options: SearchOptions,
}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct GeocodeTool;

impl GeocodeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "tomtom-geocode";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Convert street addresses to coordinates. Best for known addresses, postal codes or place names. Returns matched addresses with lat/lon positions, address components and match confidence.";

    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(params: &GeocodeParams, api: &dyn TomTomApi) -> CallToolResult {
        info!("Geocoding address: {}", params.query);
        let outcome = search::geocode(api, &params.query, &params.options).await;
        tool_result(Self::NAME, outcome)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: SharedApi,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_args};

        let params: GeocodeParams = parse_http_args(arguments)?;
        Ok(http_response(Self::execute(&params, api.as_ref()).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GeocodeParams>(),
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
                let params: GeocodeParams = parse_args(args)?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

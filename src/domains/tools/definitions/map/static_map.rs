//! Static map tool: renders a map image around a point or a bounding box.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tomtom::map::{self, StaticMapOptions};
use crate::domains::tomtom::{SharedApi, TomTomApi};
use crate::domains::tools::definitions::common::{failure, image_result, parse_args};

/// Parameters for the static map tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StaticMapParams {
    #[serde(flatten)]
    pub options: StaticMapOptions,
}

pub struct StaticMapTool;

impl StaticMapTool {
    pub const NAME: &'static str = "tomtom-static-map";

    pub const DESCRIPTION: &'static str = "Render a static map image. Frame it with center (lat/lon) and zoom (0-22, default 12), or with bbox [west, south, east, north]. Choose style (main, night), layer (basic, labels, hybrid), format (png, jpg) and size up to 8192 pixels. Returns the image.";

    #[instrument(skip_all)]
    pub async fn execute(params: &StaticMapParams, api: &dyn TomTomApi) -> CallToolResult {
        info!("Static map called");
        match map::get_static_map(api, &params.options).await {
            Ok(image) => {
                info!("{} completed ({})", Self::NAME, image.content_type);
                image_result(image)
            }
            Err(err) => failure(Self::NAME, err.into()),
        }
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: SharedApi,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_args};

        let params: StaticMapParams = parse_http_args(arguments)?;
        Ok(http_response(Self::execute(&params, api.as_ref()).await))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StaticMapParams>(),
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
                let params: StaticMapParams = parse_args(args)?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

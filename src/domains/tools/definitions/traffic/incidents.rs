//! Traffic incidents tool.
//!
//! Looks up incidents inside a bounding box. A `query` argument is accepted
//! for schema compatibility but area lookup by name is not available, so a
//! call without `bbox` fails validation.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tomtom::params::OneOrMany;
use crate::domains::tomtom::traffic::{self, TimeValidityFilter, TrafficOptions};
use crate::domains::tomtom::{SharedApi, TomTomApi, TomTomResult, guards};
use crate::domains::tools::definitions::common::{parse_args, tool_result};

/// Parameters for the traffic incidents tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrafficIncidentsParams {
    /// Area as 'minLon,minLat,maxLon,maxLat', e.g. '4.8,52.3,4.95,52.4'
    pub bbox: Option<String>,

    /// Place name for the area (bbox is required in practice)
    pub query: Option<String>,

    /// Language for incident descriptions (default 'en-GB')
    pub language: Option<String>,

    /// Maximum number of incidents to return
    pub max_results: Option<u32>,

    /// Incident categories, as a comma-separated string or a list
    pub category_filter: Option<OneOrMany>,

    /// Legacy incident type filter, used when categoryFilter is absent
    pub incident_types: Option<String>,

    /// 'present' (default) or 'future'
    pub time_filter: Option<TimeValidityFilter>,

    /// Traffic model timestamp in milliseconds
    pub t: Option<i64>,

    /// Deprecated traffic model id, used when t is absent
    pub traffic_model_id: Option<String>,

    /// Override of the response fields selector
    pub fields: Option<String>,
}

impl TrafficIncidentsParams {
    pub fn to_options(&self) -> TrafficOptions {
        TrafficOptions {
            fields: self.fields.clone(),
            language: self.language.clone(),
            time_validity_filter: self.time_filter,
            max_results: self.max_results,
            category_filter: self.category_filter.clone(),
            incident_details_types: self.incident_types.clone(),
            t: self.t,
            traffic_model_id: self.traffic_model_id.clone(),
        }
    }
}

pub struct TrafficIncidentsTool;

impl TrafficIncidentsTool {
    pub const NAME: &'static str = "tomtom-traffic";

    pub const DESCRIPTION: &'static str = "Get real-time traffic incidents (accidents, congestion, road works, closures) inside a bounding box given as 'minLon,minLat,maxLon,maxLat'. Filter by category and validity (present or future). Returns incident geometry, delay, magnitude and descriptions.";

    async fn lookup(
        params: &TrafficIncidentsParams,
        api: &dyn TomTomApi,
    ) -> TomTomResult<serde_json::Value> {
        let bbox = guards::require_traffic_area(params.bbox.as_deref(), params.query.as_deref())?;
        traffic::get_traffic_incidents(api, bbox, &params.to_options()).await
    }

    #[instrument(skip_all, fields(bbox = params.bbox.as_deref().unwrap_or("-")))]
    pub async fn execute(params: &TrafficIncidentsParams, api: &dyn TomTomApi) -> CallToolResult {
        info!("Traffic incidents called");
        tool_result(Self::NAME, Self::lookup(params, api).await)
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: SharedApi,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_args};

        let params: TrafficIncidentsParams = parse_http_args(arguments)?;
        Ok(http_response(Self::execute(&params, api.as_ref()).await))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<TrafficIncidentsParams>(),
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
                let params: TrafficIncidentsParams = parse_args(args)?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

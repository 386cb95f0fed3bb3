//! Traffic incident details (API v5).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::client::{TomTomApi, api_version};
use super::error::{TomTomError, TomTomResult};
use super::geo::BoundingBox;
use super::guards;
use super::params::{FieldTable, OneOrMany, ParamMap, ParamValue, value};
use super::request::fetch_json;

pub const DEFAULT_LANGUAGE: &str = "en-GB";

/// Full incident projection requested when the caller names no `fields`.
pub const DEFAULT_FIELDS: &str = "{incidents{type,geometry{type,coordinates},properties{id,iconCategory,magnitudeOfDelay,events{description,code,iconCategory},startTime,endTime,from,to,length,delay,roadNumbers,timeValidity,probabilityOfOccurrence,numberOfReports,lastReportTime,tmc{countryCode,tableNumber,tableVersion,direction,points{location,offset}}}}}";

/// Which incidents to return by validity period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeValidityFilter {
    #[default]
    Present,
    Future,
}

impl TimeValidityFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Future => "future",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrafficOptions {
    pub fields: Option<String>,
    pub language: Option<String>,
    pub time_validity_filter: Option<TimeValidityFilter>,
    pub max_results: Option<u32>,
    pub category_filter: Option<OneOrMany>,
    /// Legacy filter, used only without `category_filter`.
    pub incident_details_types: Option<String>,
    /// Traffic model timestamp.
    pub t: Option<i64>,
    /// Deprecated model token, used only without `t`.
    pub traffic_model_id: Option<String>,
}

/// Leading-integer parse: optional sign and digits after leading whitespace,
/// trailing garbage ignored. `None` when no digit leads.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().ok().map(|n| sign * n)
}

const TRAFFIC_FIELDS: FieldTable<TrafficOptions> = &[
    ("fields", |o| Some(o.fields.as_deref().unwrap_or(DEFAULT_FIELDS).into())),
    ("language", |o| Some(o.language.as_deref().unwrap_or(DEFAULT_LANGUAGE).into())),
    ("timeValidityFilter", |o| {
        Some(o.time_validity_filter.unwrap_or_default().as_str().into())
    }),
    ("maxResults", |o| value(&o.max_results)),
    ("categoryFilter", |o| match &o.category_filter {
        Some(filter) => Some(filter.joined()),
        None => value(&o.incident_details_types),
    }),
    ("t", |o| match o.t {
        Some(t) => Some(ParamValue::Int(t)),
        None => o
            .traffic_model_id
            .as_deref()
            .and_then(parse_leading_int)
            .map(ParamValue::Int),
    }),
];

/// Incident parameters for a validated area. `bbox`, `fields`, `language`
/// and `timeValidityFilter` are always present.
pub fn build_traffic_params(bbox: &BoundingBox, options: &TrafficOptions) -> ParamMap {
    let mut params = ParamMap::new();
    params.insert("bbox", bbox.to_string());
    params.apply(options, TRAFFIC_FIELDS);
    params
}

fn incidents_path() -> String {
    format!("/traffic/services/{}/incidentDetails", api_version::TRAFFIC)
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

async fn request_incidents(
    api: &dyn TomTomApi,
    bbox: &BoundingBox,
    options: &TrafficOptions,
) -> TomTomResult<Value> {
    let path = incidents_path();
    let params = build_traffic_params(bbox, options);
    let query = serde_urlencoded::to_string(params.to_query_pairs()).unwrap_or_default();
    debug!("Traffic incidents request: {}?{}", path, query);
    fetch_json(api, &path, &params, "traffic incidents").await
}

/// Incidents inside `bbox` (`minLon,minLat,maxLon,maxLat`).
///
/// A 400 naming an unknown traffic model is retried once with `t` set to the
/// current time and the model token dropped.
pub async fn get_traffic_incidents(
    api: &dyn TomTomApi,
    bbox: &str,
    options: &TrafficOptions,
) -> TomTomResult<Value> {
    let bbox = guards::parse_bbox(bbox)?;
    debug!(
        "Getting traffic incidents for bbox: {}, language: {}, timeFilter: {}",
        bbox,
        options.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
        options.time_validity_filter.unwrap_or_default().as_str()
    );

    match request_incidents(api, &bbox, options).await {
        Err(TomTomError::Api(err)) if err.is_stale_traffic_model() => {
            warn!("Received Unknown TrafficModelId error, retrying with current timestamp");
            let retry = TrafficOptions {
                t: Some(now_millis()),
                traffic_model_id: None,
                ..options.clone()
            };
            request_incidents(api, &bbox, &retry).await
        }
        result => result,
    }
}

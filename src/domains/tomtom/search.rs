//! Search API: fuzzy search, POI search, geocoding, nearby search and
//! reverse geocoding.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::client::{TomTomApi, api_version};
use super::error::TomTomResult;
use super::geo::Coordinate;
use super::guards;
use super::params::{FieldTable, Merge, OneOrMany, ParamMap, ParamValue, impl_merge, value};
use super::request::fetch_json;

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_LIMIT: u32 = 10;
pub const NEARBY_DEFAULT_RADIUS: f64 = 1000.0;
pub const NEARBY_DEFAULT_LIMIT: u32 = 20;
pub const REVERSE_DEFAULT_RADIUS: f64 = 100.0;
pub const REVERSE_DEFAULT_LIMIT: u32 = 5;

/// Options shared by the free-text search family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    /// Maximum number of results to return (1-100)
    pub limit: Option<u32>,
    /// Autocomplete mode for partial queries
    pub typeahead: Option<bool>,
    /// IETF language tag for results, e.g. 'en-US', 'fr-FR'
    pub language: Option<String>,
    /// Latitude for location bias (used together with lon)
    pub lat: Option<f64>,
    /// Longitude for location bias (used together with lat)
    pub lon: Option<f64>,
    /// Search radius in meters, only applied when lat/lon are given
    pub radius: Option<f64>,
    /// Comma-separated ISO country codes, e.g. 'FR,GB'
    pub country_set: Option<String>,
    /// Top-left corner 'lat,lon' of the search box (requires btmRight)
    pub top_left: Option<String>,
    /// Bottom-right corner 'lat,lon' of the search box (requires topLeft)
    pub btm_right: Option<String>,
    /// POI category ids, e.g. '7315' (restaurants), '9663' (EV charging)
    pub category_set: Option<String>,
    /// Brand names, comma-separated
    pub brand_set: Option<String>,
    /// EV connector types
    pub connector_set: Option<String>,
    /// Fuel types: 'Petrol', 'Diesel', 'LPG', ...
    pub fuel_set: Option<String>,
    /// Restrict POIs to vehicle types: 'Car', 'Truck'
    pub vehicle_type_set: Option<String>,
    /// Minimum charging power in kW
    #[serde(rename = "minPowerKW")]
    pub min_power_kw: Option<f64>,
    /// Maximum charging power in kW
    #[serde(rename = "maxPowerKW")]
    pub max_power_kw: Option<f64>,
    /// Any value requests opening hours for the next seven days
    pub opening_hours: Option<String>,
    pub charging_availability: Option<bool>,
    pub parking_availability: Option<bool>,
    pub fuel_availability: Option<bool>,
    /// Minimum fuzzy matching level (1-4)
    pub min_fuzzy_level: Option<u32>,
    /// Maximum fuzzy matching level (1-4)
    pub max_fuzzy_level: Option<u32>,
    /// Pagination offset
    pub ofs: Option<u32>,
    /// Mapcode types: 'Local', 'International', 'Alternative'
    pub mapcodes: Option<OneOrMany>,
    /// 'iana' returns the POI time zone
    pub time_zone: Option<String>,
    /// Geopolitical view, e.g. 'Unified'
    pub view: Option<String>,
    pub related_pois: Option<String>,
    pub geometries: Option<bool>,
    pub sort: Option<String>,
    /// Index types with extended postal codes, e.g. 'PAD,Addr'
    pub extended_postal_codes_for: Option<String>,
    /// Geographic entity types, e.g. 'Municipality'
    pub entity_type_set: Option<String>,
    pub road_use: Option<bool>,
    pub address_ranges: Option<bool>,
    pub ext: Option<String>,
    pub idx_set: Option<String>,
    pub gom_list: Option<bool>,
    pub connectors: Option<bool>,
}

impl_merge!(SearchOptions {
    limit, typeahead, language, lat, lon, radius, country_set, top_left, btm_right,
    category_set, brand_set, connector_set, fuel_set, vehicle_type_set, min_power_kw,
    max_power_kw, opening_hours, charging_availability, parking_availability,
    fuel_availability, min_fuzzy_level, max_fuzzy_level, ofs, mapcodes, time_zone, view,
    related_pois, geometries, sort, extended_postal_codes_for, entity_type_set, road_use,
    address_ranges, ext, idx_set, gom_list, connectors
});

impl SearchOptions {
    /// `lat`/`lon` bias, only when both halves are present.
    fn bias(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.lat?, self.lon?))
    }

    fn bias_value(&self, pick: fn(&Coordinate) -> f64) -> Option<ParamValue> {
        self.bias().map(|c| ParamValue::Float(pick(&c)))
    }

    /// `topLeft`/`btmRight` only travel as a pair.
    fn box_corner(&self, corner: &Option<String>) -> Option<ParamValue> {
        self.top_left.as_ref().and(self.btm_right.as_ref())?;
        value(corner)
    }
}

/// Every search key, in emission order.
const SEARCH_FIELDS: FieldTable<SearchOptions> = &[
    ("limit", |o| value(&o.limit)),
    ("typeahead", |o| value(&o.typeahead)),
    ("language", |o| value(&o.language)),
    ("lat", |o| o.bias_value(|c| c.lat)),
    ("lon", |o| o.bias_value(|c| c.lon)),
    ("radius", |o| o.bias().and(value(&o.radius))),
    ("countrySet", |o| value(&o.country_set)),
    ("topLeft", |o| o.box_corner(&o.top_left)),
    ("btmRight", |o| o.box_corner(&o.btm_right)),
    ("categorySet", |o| value(&o.category_set)),
    ("brandSet", |o| value(&o.brand_set)),
    ("connectorSet", |o| value(&o.connector_set)),
    ("fuelSet", |o| value(&o.fuel_set)),
    ("vehicleTypeSet", |o| value(&o.vehicle_type_set)),
    ("minPowerKW", |o| value(&o.min_power_kw)),
    ("maxPowerKW", |o| value(&o.max_power_kw)),
    ("openingHours", |o| o.opening_hours.as_ref().map(|_| "nextSevenDays".into())),
    ("chargingAvailability", |o| value(&o.charging_availability)),
    ("parkingAvailability", |o| value(&o.parking_availability)),
    ("fuelAvailability", |o| value(&o.fuel_availability)),
    ("minFuzzyLevel", |o| value(&o.min_fuzzy_level)),
    ("maxFuzzyLevel", |o| value(&o.max_fuzzy_level)),
    ("ofs", |o| value(&o.ofs)),
    ("mapcodes", |o| o.mapcodes.as_ref().map(OneOrMany::repeated)),
    ("timeZone", |o| value(&o.time_zone)),
    ("view", |o| value(&o.view)),
    ("relatedPois", |o| value(&o.related_pois)),
    ("geometries", |o| value(&o.geometries)),
    ("sort", |o| value(&o.sort)),
    ("extendedPostalCodesFor", |o| value(&o.extended_postal_codes_for)),
    ("entityTypeSet", |o| value(&o.entity_type_set)),
    ("roadUse", |o| value(&o.road_use)),
    ("addressRanges", |o| value(&o.address_ranges)),
    ("ext", |o| value(&o.ext)),
    ("idxSet", |o| value(&o.idx_set)),
    ("gomList", |o| value(&o.gom_list)),
    ("connectors", |o| value(&o.connectors)),
];

/// Merges `options` over `defaults` and emits every resolved search key.
pub fn build_search_params(options: &SearchOptions, defaults: &SearchOptions) -> ParamMap {
    let merged = options.merge(defaults);
    let mut params = ParamMap::new();
    params.apply(&merged, SEARCH_FIELDS);
    params
}

/// Options for reverse geocoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReverseGeocodeOptions {
    /// Maximum number of results to return
    pub limit: Option<u32>,
    /// Alias for limit, used only when limit is not given
    pub max_results: Option<u32>,
    pub language: Option<String>,
    /// Search radius in meters around the point
    pub radius: Option<f64>,
    pub country_set: Option<String>,
    pub view: Option<String>,
    pub extended_postal_codes_for: Option<String>,
    pub mapcodes: Option<OneOrMany>,
    pub time_zone: Option<String>,
    pub geometries: Option<bool>,
    pub address_ranges: Option<bool>,
    /// Filter by entity types: 'Country', 'Municipality', ...
    pub entity_type_set: Option<String>,
    pub ofs: Option<u32>,
    /// Include the type of geocoding match achieved
    pub return_match_type: Option<bool>,
    /// Include the posted speed limit for street results
    pub return_speed_limit: Option<bool>,
    /// Include road use types for street results
    pub return_road_use: Option<bool>,
    /// Road use types to include: 'Arterial', 'Ferry', 'Highway', ...
    pub road_use: Option<OneOrMany>,
    pub allow_freeform_new_line: Option<bool>,
    pub return_address_names: Option<bool>,
    /// Heading in degrees (0-360) for better on-road accuracy
    pub heading: Option<f64>,
    pub return_road_accessibility: Option<bool>,
    pub return_commune: Option<bool>,
}

impl_merge!(ReverseGeocodeOptions {
    limit, max_results, language, radius, country_set, view, extended_postal_codes_for,
    mapcodes, time_zone, geometries, address_ranges, entity_type_set, ofs, return_match_type,
    return_speed_limit, return_road_use, road_use, allow_freeform_new_line,
    return_address_names, heading, return_road_accessibility, return_commune
});

const REVERSE_GEOCODE_FIELDS: FieldTable<ReverseGeocodeOptions> = &[
    ("limit", |o| value(&o.limit)),
    ("maxResults", |o| o.limit.is_none().then(|| value(&o.max_results)).flatten()),
    ("language", |o| value(&o.language)),
    ("radius", |o| value(&o.radius)),
    ("countrySet", |o| value(&o.country_set)),
    ("view", |o| value(&o.view)),
    ("extendedPostalCodesFor", |o| value(&o.extended_postal_codes_for)),
    ("mapcodes", |o| o.mapcodes.as_ref().map(OneOrMany::repeated)),
    ("timeZone", |o| value(&o.time_zone)),
    ("geometries", |o| value(&o.geometries)),
    ("addressRanges", |o| value(&o.address_ranges)),
    ("entityTypeSet", |o| value(&o.entity_type_set)),
    ("ofs", |o| value(&o.ofs)),
    ("returnSpeedLimit", |o| value(&o.return_speed_limit)),
    ("returnRoadUse", |o| value(&o.return_road_use)),
    ("allowFreeformNewLine", |o| value(&o.allow_freeform_new_line)),
    ("returnMatchType", |o| value(&o.return_match_type)),
    ("heading", |o| value(&o.heading)),
    ("returnRoadAccessibility", |o| value(&o.return_road_accessibility)),
    ("returnCommune", |o| value(&o.return_commune)),
    ("returnAddressNames", |o| value(&o.return_address_names)),
    ("roadUse", |o| o.road_use.as_ref().map(OneOrMany::joined)),
];

/// Reverse-geocode parameters. A caller `maxResults` without `limit` stands
/// in for the default limit.
pub fn build_reverse_geocode_params(
    options: &ReverseGeocodeOptions,
    defaults: &ReverseGeocodeOptions,
) -> ParamMap {
    let mut defaults = defaults.clone();
    if options.limit.is_none() && options.max_results.is_some() {
        defaults.limit = None;
    }
    let merged = options.merge(&defaults);
    let mut params = ParamMap::new();
    params.apply(&merged, REVERSE_GEOCODE_FIELDS);
    params
}

fn search_defaults(limit: u32) -> SearchOptions {
    SearchOptions {
        limit: Some(limit),
        language: Some(DEFAULT_LANGUAGE.to_string()),
        ..SearchOptions::default()
    }
}

fn reverse_geocode_defaults() -> ReverseGeocodeOptions {
    ReverseGeocodeOptions {
        radius: Some(REVERSE_DEFAULT_RADIUS),
        language: Some(DEFAULT_LANGUAGE.to_string()),
        limit: Some(REVERSE_DEFAULT_LIMIT),
        ..ReverseGeocodeOptions::default()
    }
}

fn query_path(endpoint: &str, query: &str) -> String {
    format!(
        "/search/{}/{}/{}.json",
        api_version::SEARCH,
        endpoint,
        urlencoding::encode(query)
    )
}

fn check_bias(options: &SearchOptions) -> TomTomResult<()> {
    match options.bias() {
        Some(bias) => guards::check_coordinate(&bias, "Location bias"),
        None => Ok(()),
    }
}

/// Free-form search over addresses, POIs and places.
pub async fn fuzzy_search(
    api: &dyn TomTomApi,
    query: &str,
    options: &SearchOptions,
) -> TomTomResult<Value> {
    check_bias(options)?;
    let params = build_search_params(options, &search_defaults(DEFAULT_LIMIT));
    debug!("Fuzzy searching for: {:?}", query);
    fetch_json(api, &query_path("search", query), &params, "fuzzy search").await
}

/// Search restricted to points of interest.
pub async fn poi_search(
    api: &dyn TomTomApi,
    query: &str,
    options: &SearchOptions,
) -> TomTomResult<Value> {
    check_bias(options)?;
    let params = build_search_params(options, &search_defaults(DEFAULT_LIMIT));
    debug!("POI searching for: {:?}", query);
    fetch_json(api, &query_path("poiSearch", query), &params, "POI search").await
}

/// Address to coordinates.
pub async fn geocode(
    api: &dyn TomTomApi,
    query: &str,
    options: &SearchOptions,
) -> TomTomResult<Value> {
    check_bias(options)?;
    let params = build_search_params(options, &search_defaults(DEFAULT_LIMIT));
    debug!("Geocoding address: {:?}", query);
    fetch_json(api, &query_path("geocode", query), &params, "geocode").await
}

/// POIs around `center`. The center is sent as the `lat`/`lon` bias so the
/// default radius applies.
pub async fn nearby_search(
    api: &dyn TomTomApi,
    center: Coordinate,
    options: &SearchOptions,
) -> TomTomResult<Value> {
    guards::check_coordinate(&center, "Center")?;
    let options = SearchOptions {
        lat: Some(center.lat),
        lon: Some(center.lon),
        ..options.clone()
    };
    let defaults = SearchOptions {
        radius: Some(NEARBY_DEFAULT_RADIUS),
        ..search_defaults(NEARBY_DEFAULT_LIMIT)
    };
    let params = build_search_params(&options, &defaults);
    debug!(
        "Searching nearby: ({}), category: {}",
        center,
        options.category_set.as_deref().unwrap_or("any")
    );
    let path = format!("/search/{}/nearbySearch/.json", api_version::SEARCH);
    fetch_json(api, &path, &params, "nearby search").await
}

/// Coordinates to address.
pub async fn reverse_geocode(
    api: &dyn TomTomApi,
    position: Coordinate,
    options: &ReverseGeocodeOptions,
) -> TomTomResult<Value> {
    guards::check_coordinate(&position, "Position")?;
    let params = build_reverse_geocode_params(options, &reverse_geocode_defaults());
    let path = format!("/search/{}/reverseGeocode/{}.json", api_version::SEARCH, position);
    debug!("Reverse geocoding coordinates: ({})", position);
    fetch_json(api, &path, &params, "reverse geocode").await
}

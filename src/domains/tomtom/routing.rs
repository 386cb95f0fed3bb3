//! Routing API: point-to-point and multi-stop routes, reachable range.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::client::{TomTomApi, api_version};
use super::error::TomTomResult;
use super::geo::Coordinate;
use super::guards;
use super::params::{FieldTable, OneOrMany, ParamMap, value};
use super::request::fetch_json;

pub const DEFAULT_COMPUTE_TRAVEL_TIME_FOR: &str = "all";
pub const DEFAULT_ROUTE_TYPE: &str = "fastest";

/// Vehicle, engine and consumption model shared by routes and reachable range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleOptions {
    /// Maximum vehicle speed in km/h
    pub vehicle_max_speed: Option<f64>,
    /// Vehicle weight in kilograms
    pub vehicle_weight: Option<f64>,
    /// Vehicle width in meters
    pub vehicle_width: Option<f64>,
    /// Vehicle height in meters
    pub vehicle_height: Option<f64>,
    /// Vehicle length in meters
    pub vehicle_length: Option<f64>,
    /// Whether the vehicle is used for commercial purposes
    pub vehicle_commercial: Option<bool>,
    /// Weight per axle in kilograms
    pub vehicle_axle_weight: Option<f64>,
    pub vehicle_number_of_axles: Option<u32>,
    /// Cargo type for hazardous materials routing
    pub vehicle_load_type: Option<String>,
    /// ADR tunnel restriction code: 'B', 'C', 'D' or 'E'
    pub vehicle_adr_tunnel_restriction_code: Option<String>,
    /// 'combustion' or 'electric'
    pub vehicle_engine_type: Option<String>,

    /// Speed/consumption pairs, e.g. '50,8.2:130,21.3'
    #[serde(rename = "constantSpeedConsumptionInkWhPerHundredkm")]
    pub constant_speed_consumption_in_kwh_per_hundredkm: Option<String>,
    #[serde(rename = "currentChargeInkWh")]
    pub current_charge_in_kwh: Option<f64>,
    #[serde(rename = "maxChargeInkWh")]
    pub max_charge_in_kwh: Option<f64>,
    #[serde(rename = "auxiliaryPowerInkW")]
    pub auxiliary_power_in_kw: Option<f64>,
    #[serde(rename = "chargeMarginsInkWh")]
    pub charge_margins_in_kwh: Option<String>,

    /// Speed/consumption pairs for combustion engines
    pub constant_speed_consumption_in_liters_per_hundredkm: Option<String>,
    pub current_fuel_in_liters: Option<f64>,
    pub auxiliary_power_in_liters_per_hour: Option<f64>,
    #[serde(rename = "fuelEnergyDensityInMJoulesPerLiter")]
    pub fuel_energy_density_in_mjoules_per_liter: Option<f64>,

    /// Efficiency during acceleration (0-1)
    pub acceleration_efficiency: Option<f64>,
    /// Efficiency during deceleration (0-1)
    pub deceleration_efficiency: Option<f64>,
    /// Efficiency during uphill driving (0-1)
    pub uphill_efficiency: Option<f64>,
    /// Efficiency during downhill driving (0-1)
    pub downhill_efficiency: Option<f64>,
    #[serde(rename = "consumptionInkWhPerkmAltitudeGain")]
    pub consumption_in_kwh_per_km_altitude_gain: Option<f64>,
    #[serde(rename = "recuperationInkWhPerkmAltitudeLoss")]
    pub recuperation_in_kwh_per_km_altitude_loss: Option<f64>,
}

const VEHICLE_FIELDS: FieldTable<VehicleOptions> = &[
    ("vehicleMaxSpeed", |v| value(&v.vehicle_max_speed)),
    ("vehicleWeight", |v| value(&v.vehicle_weight)),
    ("vehicleWidth", |v| value(&v.vehicle_width)),
    ("vehicleHeight", |v| value(&v.vehicle_height)),
    ("vehicleLength", |v| value(&v.vehicle_length)),
    ("vehicleCommercial", |v| value(&v.vehicle_commercial)),
    ("vehicleAxleWeight", |v| value(&v.vehicle_axle_weight)),
    ("vehicleLoadType", |v| value(&v.vehicle_load_type)),
    ("vehicleNumberOfAxles", |v| value(&v.vehicle_number_of_axles)),
    ("vehicleAdrTunnelRestrictionCode", |v| value(&v.vehicle_adr_tunnel_restriction_code)),
    ("vehicleEngineType", |v| value(&v.vehicle_engine_type)),
    ("constantSpeedConsumptionInkWhPerHundredkm", |v| {
        value(&v.constant_speed_consumption_in_kwh_per_hundredkm)
    }),
    ("currentChargeInkWh", |v| value(&v.current_charge_in_kwh)),
    ("maxChargeInkWh", |v| value(&v.max_charge_in_kwh)),
    ("auxiliaryPowerInkW", |v| value(&v.auxiliary_power_in_kw)),
    ("chargeMarginsInkWh", |v| value(&v.charge_margins_in_kwh)),
    ("constantSpeedConsumptionInLitersPerHundredkm", |v| {
        value(&v.constant_speed_consumption_in_liters_per_hundredkm)
    }),
    ("currentFuelInLiters", |v| value(&v.current_fuel_in_liters)),
    ("auxiliaryPowerInLitersPerHour", |v| value(&v.auxiliary_power_in_liters_per_hour)),
    ("fuelEnergyDensityInMJoulesPerLiter", |v| {
        value(&v.fuel_energy_density_in_mjoules_per_liter)
    }),
    ("accelerationEfficiency", |v| value(&v.acceleration_efficiency)),
    ("decelerationEfficiency", |v| value(&v.deceleration_efficiency)),
    ("uphillEfficiency", |v| value(&v.uphill_efficiency)),
    ("downhillEfficiency", |v| value(&v.downhill_efficiency)),
    ("consumptionInkWhPerkmAltitudeGain", |v| {
        value(&v.consumption_in_kwh_per_km_altitude_gain)
    }),
    ("recuperationInkWhPerkmAltitudeLoss", |v| {
        value(&v.recuperation_in_kwh_per_km_altitude_loss)
    }),
];

/// Route calculation options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptions {
    /// 'none' or 'all' (default)
    pub compute_travel_time_for: Option<String>,
    /// 'fastest' (default), 'shortest', 'eco' or 'thrilling'
    pub route_type: Option<String>,
    /// Use real-time traffic data
    pub traffic: Option<bool>,
    /// Departure time in ISO format. Takes precedence over arriveAt.
    pub depart_at: Option<String>,
    /// Arrival time in ISO format
    pub arrive_at: Option<String>,
    /// 'car', 'pedestrian', 'bicycle', 'truck', 'taxi', 'bus' or 'van'
    pub travel_mode: Option<String>,
    /// Features to avoid: 'tollRoads', 'motorways', 'ferries', 'unpavedRoads', ...
    pub avoid: Option<OneOrMany>,
    /// Section types to report: 'toll', 'traffic', 'tunnel', ...
    pub section_type: Option<OneOrMany>,
    /// Number of alternative routes (0-5)
    pub max_alternatives: Option<u32>,
    /// 'anyRoute' or 'betterRoute'
    pub alternative_type: Option<String>,
    pub min_deviation_distance: Option<f64>,
    pub min_deviation_time: Option<f64>,
    /// Language for guidance instructions
    pub language: Option<String>,
    /// 'coded', 'text' or 'tagged'
    pub instructions_type: Option<String>,
    /// 'all' or 'none'
    pub include_toll_payment_types: Option<String>,
    /// Reorder intermediate waypoints for the shortest trip
    pub compute_best_order: Option<bool>,
    pub supporting_points: Option<String>,
    pub supporting_point_index_of_origin: Option<u32>,
    /// Initial heading in degrees (0-359)
    pub vehicle_heading: Option<f64>,
    #[serde(rename = "minChargeAtDestinationInkWh")]
    pub min_charge_at_destination_in_kwh: Option<f64>,
    #[serde(rename = "minChargeAtChargingStopsInkWh")]
    pub min_charge_at_charging_stops_in_kwh: Option<f64>,
    /// 'effectiveSettings'
    pub report: Option<String>,
    /// 'polyline', 'summaryOnly', 'encodedPolyline' or 'none'
    pub route_representation: Option<String>,
    pub extended_route_representation: Option<String>,
    pub enhanced_narrative: Option<bool>,
    /// 'low', 'normal' or 'high' (thrilling routes)
    pub hilliness: Option<String>,
    /// 'low', 'normal' or 'high' (thrilling routes)
    pub windingness: Option<String>,
    pub time_consideration: Option<String>,
    pub route_vehicle_type: Option<String>,
    pub callback: Option<String>,
    #[serde(flatten)]
    pub vehicle: VehicleOptions,
}

const ROUTE_FIELDS: FieldTable<RouteOptions> = &[
    ("computeTravelTimeFor", |o| {
        Some(o.compute_travel_time_for.as_deref().unwrap_or(DEFAULT_COMPUTE_TRAVEL_TIME_FOR).into())
    }),
    ("routeType", |o| Some(o.route_type.as_deref().unwrap_or(DEFAULT_ROUTE_TYPE).into())),
    ("traffic", |o| value(&o.traffic)),
    ("departAt", |o| value(&o.depart_at)),
    ("arriveAt", |o| o.depart_at.is_none().then(|| value(&o.arrive_at)).flatten()),
    ("travelMode", |o| value(&o.travel_mode)),
    ("avoid", |o| o.avoid.as_ref().map(OneOrMany::repeated)),
    ("sectionType", |o| o.section_type.as_ref().map(OneOrMany::repeated)),
    ("maxAlternatives", |o| value(&o.max_alternatives)),
    ("alternativeType", |o| value(&o.alternative_type)),
    ("minDeviationDistance", |o| value(&o.min_deviation_distance)),
    ("minDeviationTime", |o| value(&o.min_deviation_time)),
    ("language", |o| value(&o.language)),
    ("instructionsType", |o| value(&o.instructions_type)),
    ("includeTollPaymentTypes", |o| value(&o.include_toll_payment_types)),
    ("computeBestOrder", |o| value(&o.compute_best_order)),
    ("supportingPoints", |o| value(&o.supporting_points)),
    ("supportingPointIndexOfOrigin", |o| value(&o.supporting_point_index_of_origin)),
    ("vehicleHeading", |o| value(&o.vehicle_heading)),
    ("minChargeAtDestinationInkWh", |o| value(&o.min_charge_at_destination_in_kwh)),
    ("minChargeAtChargingStopsInkWh", |o| value(&o.min_charge_at_charging_stops_in_kwh)),
    ("report", |o| value(&o.report)),
    ("routeRepresentation", |o| value(&o.route_representation)),
    ("extendedRouteRepresentation", |o| value(&o.extended_route_representation)),
    ("enhancedNarrative", |o| value(&o.enhanced_narrative)),
    ("hilliness", |o| value(&o.hilliness)),
    ("windingness", |o| value(&o.windingness)),
    ("timeConsideration", |o| value(&o.time_consideration)),
    ("routeVehicleType", |o| value(&o.route_vehicle_type)),
    ("callback", |o| value(&o.callback)),
];

/// Route parameters. `computeTravelTimeFor` and `routeType` are always sent.
pub fn build_route_params(options: &RouteOptions) -> ParamMap {
    let mut params = ParamMap::new();
    params.apply(options, ROUTE_FIELDS);
    params.apply(&options.vehicle, VEHICLE_FIELDS);
    params
}

/// Reachable range (isochrone) options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReachableRangeOptions {
    /// Time budget in seconds
    pub time_budget_in_sec: Option<f64>,
    /// Distance budget in meters
    pub distance_budget_in_meters: Option<f64>,
    /// Energy budget in kWh (electric vehicles)
    #[serde(rename = "energyBudgetInkWh")]
    pub energy_budget_in_kwh: Option<f64>,
    /// Fuel budget in liters (combustion vehicles)
    pub fuel_budget_in_liters: Option<f64>,
    pub travel_mode: Option<String>,
    pub route_type: Option<String>,
    pub traffic: Option<bool>,
    pub avoid: Option<OneOrMany>,
    /// Maximum allowed ferry length in meters
    pub max_ferry_length_in_meters: Option<f64>,
    pub depart_at: Option<String>,
    pub hilliness: Option<String>,
    pub windingness: Option<String>,
    pub report: Option<String>,
    pub callback: Option<String>,
    #[serde(flatten)]
    pub vehicle: VehicleOptions,
}

impl ReachableRangeOptions {
    fn budgets(&self) -> [Option<f64>; 4] {
        [
            self.time_budget_in_sec,
            self.distance_budget_in_meters,
            self.energy_budget_in_kwh,
            self.fuel_budget_in_liters,
        ]
    }
}

const REACHABLE_RANGE_FIELDS: FieldTable<ReachableRangeOptions> = &[
    ("timeBudgetInSec", |o| value(&o.time_budget_in_sec)),
    ("distanceBudgetInMeters", |o| value(&o.distance_budget_in_meters)),
    ("energyBudgetInkWh", |o| value(&o.energy_budget_in_kwh)),
    ("fuelBudgetInLiters", |o| value(&o.fuel_budget_in_liters)),
    ("travelMode", |o| value(&o.travel_mode)),
    ("routeType", |o| value(&o.route_type)),
    ("traffic", |o| value(&o.traffic)),
    ("avoid", |o| o.avoid.as_ref().map(OneOrMany::repeated)),
    ("maxFerryLengthInMeters", |o| value(&o.max_ferry_length_in_meters)),
    ("departAt", |o| value(&o.depart_at)),
    ("hilliness", |o| value(&o.hilliness)),
    ("windingness", |o| value(&o.windingness)),
    ("report", |o| value(&o.report)),
    ("callback", |o| value(&o.callback)),
];

pub fn build_reachable_range_params(options: &ReachableRangeOptions) -> ParamMap {
    let mut params = ParamMap::new();
    params.apply(options, REACHABLE_RANGE_FIELDS);
    params.apply(&options.vehicle, VEHICLE_FIELDS);
    params
}

fn route_path(points: &[Coordinate]) -> String {
    let joined = points
        .iter()
        .map(Coordinate::to_string)
        .collect::<Vec<_>>()
        .join(":");
    format!("/routing/{}/calculateRoute/{}/json", api_version::ROUTING, joined)
}

/// Route between two points.
pub async fn get_route(
    api: &dyn TomTomApi,
    origin: Coordinate,
    destination: Coordinate,
    options: &RouteOptions,
) -> TomTomResult<Value> {
    guards::check_coordinate(&origin, "Origin")?;
    guards::check_coordinate(&destination, "Destination")?;
    debug!("Calculating route from ({}) to ({})", origin, destination);

    let params = build_route_params(options);
    fetch_json(api, &route_path(&[origin, destination]), &params, "routing").await
}

/// Route through `waypoints` in order.
pub async fn get_multi_waypoint_route(
    api: &dyn TomTomApi,
    waypoints: &[Coordinate],
    options: &RouteOptions,
) -> TomTomResult<Value> {
    guards::check_waypoints(waypoints)?;
    debug!("Calculating multi-waypoint route with {} points", waypoints.len());

    let params = build_route_params(options);
    fetch_json(api, &route_path(waypoints), &params, "waypoint routing").await
}

/// Area reachable from `origin` within the given budget.
pub async fn get_reachable_range(
    api: &dyn TomTomApi,
    origin: Coordinate,
    options: &ReachableRangeOptions,
) -> TomTomResult<Value> {
    guards::check_budget(options.budgets())?;
    guards::check_coordinate(&origin, "Origin")?;
    debug!("Calculating reachable range from ({})", origin);

    let params = build_reachable_range_params(options);
    let path = format!(
        "/routing/{}/calculateReachableRange/{}/json",
        api_version::ROUTING,
        origin
    );
    fetch_json(api, &path, &params, "reachable range").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tomtom::mock::MockApi;
    use crate::domains::tomtom::params::ParamValue;
    use serde_json::json;

    #[test]
    fn test_route_always_has_travel_time_and_type() {
        let params = build_route_params(&RouteOptions::default());
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["computeTravelTimeFor", "routeType"]);
        assert_eq!(
            params.get("computeTravelTimeFor"),
            Some(&ParamValue::Text("all".to_string()))
        );
        assert_eq!(params.get("routeType"), Some(&ParamValue::Text("fastest".to_string())));
    }

    #[test]
    fn test_depart_at_wins_over_arrive_at() {
        let options = RouteOptions {
            depart_at: Some("2025-06-24T14:30:00Z".to_string()),
            arrive_at: Some("2025-06-24T17:00:00Z".to_string()),
            ..RouteOptions::default()
        };
        let params = build_route_params(&options);
        assert!(params.contains_key("departAt"));
        assert!(!params.contains_key("arriveAt"));

        let options = RouteOptions {
            depart_at: None,
            ..options
        };
        assert!(build_route_params(&options).contains_key("arriveAt"));
    }

    #[test]
    fn test_zero_and_false_are_sent() {
        let options = RouteOptions {
            traffic: Some(false),
            max_alternatives: Some(0),
            vehicle: VehicleOptions {
                vehicle_weight: Some(0.0),
                ..VehicleOptions::default()
            },
            ..RouteOptions::default()
        };
        let params = build_route_params(&options);
        assert_eq!(params.get("traffic"), Some(&ParamValue::Bool(false)));
        assert_eq!(params.get("maxAlternatives"), Some(&ParamValue::Int(0)));
        assert_eq!(params.get("vehicleWeight").map(ParamValue::render), Some("0".to_string()));
    }

    #[test]
    fn test_ev_fields_deserialize_with_upstream_names() {
        let options: RouteOptions = serde_json::from_value(json!({
            "vehicleEngineType": "electric",
            "currentChargeInkWh": 43,
            "maxChargeInkWh": 85,
            "constantSpeedConsumptionInkWhPerHundredkm": "50,8.2:130,21.3",
            "minChargeAtDestinationInkWh": 5
        }))
        .unwrap();
        let params = build_route_params(&options);
        assert_eq!(
            params.get("currentChargeInkWh").map(ParamValue::render),
            Some("43".to_string())
        );
        assert!(params.contains_key("constantSpeedConsumptionInkWhPerHundredkm"));
        assert!(params.contains_key("minChargeAtDestinationInkWh"));
    }

    #[test]
    fn test_avoid_repeats_key() {
        let options: RouteOptions =
            serde_json::from_value(json!({"avoid": ["tollRoads", "ferries"], "sectionType": "toll"}))
                .unwrap();
        let pairs = build_route_params(&options).to_query_pairs();
        assert!(pairs.contains(&("avoid".to_string(), "tollRoads".to_string())));
        assert!(pairs.contains(&("avoid".to_string(), "ferries".to_string())));
        assert!(pairs.contains(&("sectionType".to_string(), "toll".to_string())));
    }

    #[test]
    fn test_reachable_range_zero_budget_is_present() {
        let options = ReachableRangeOptions {
            distance_budget_in_meters: Some(0.0),
            ..ReachableRangeOptions::default()
        };
        assert!(guards::check_budget(options.budgets()).is_ok());
        let params = build_reachable_range_params(&options);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["distanceBudgetInMeters"]);
    }

    #[tokio::test]
    async fn test_route_path_joins_lat_lon_pairs() {
        let api = MockApi::with_json(json!({"routes": []}));
        get_route(
            &api,
            Coordinate::new(52.37, 4.89),
            Coordinate::new(52.09, 5.12),
            &RouteOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(
            api.last_call().unwrap().path,
            "/routing/1/calculateRoute/52.37,4.89:52.09,5.12/json"
        );
    }

    #[tokio::test]
    async fn test_waypoint_route_needs_two_points() {
        let api = MockApi::with_json(json!({}));
        let err = get_multi_waypoint_route(&api, &[Coordinate::new(52.0, 4.0)], &RouteOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("At least two waypoints"));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reachable_range_without_budget_never_calls_api() {
        let api = MockApi::with_json(json!({}));
        let err = get_reachable_range(
            &api,
            Coordinate::new(52.37, 4.89),
            &ReachableRangeOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("time, distance, energy, or fuel"));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reachable_range_path() {
        let api = MockApi::with_json(json!({"reachableRange": {}}));
        let options = ReachableRangeOptions {
            time_budget_in_sec: Some(1800.0),
            ..ReachableRangeOptions::default()
        };
        get_reachable_range(&api, Coordinate::new(52.37, 4.89), &options)
            .await
            .unwrap();
        let call = api.last_call().unwrap();
        assert_eq!(call.path, "/routing/1/calculateReachableRange/52.37,4.89/json");
        assert_eq!(
            call.params.get("timeBudgetInSec").map(ParamValue::render),
            Some("1800".to_string())
        );
    }
}

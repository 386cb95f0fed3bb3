//! Pre-flight checks. Every guard runs before a builder or the transport, so a
//! rejected request never costs upstream quota.

use super::error::{TomTomError, TomTomResult};
use super::geo::{BoundingBox, Coordinate};

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 22.0;
pub const MIN_DIMENSION: f64 = 1.0;
pub const MAX_DIMENSION: f64 = 8192.0;

/// Latitude/longitude range check; `label` names the offending input.
pub fn check_coordinate(coordinate: &Coordinate, label: &str) -> TomTomResult<()> {
    if !(-90.0..=90.0).contains(&coordinate.lat) {
        return Err(TomTomError::validation(format!(
            "{} latitude must be between -90 and 90",
            label
        )));
    }
    if !(-180.0..=180.0).contains(&coordinate.lon) {
        return Err(TomTomError::validation(format!(
            "{} longitude must be between -180 and 180",
            label
        )));
    }
    Ok(())
}

/// Multi-stop routes need an origin and a destination.
pub fn check_waypoints(waypoints: &[Coordinate]) -> TomTomResult<()> {
    if waypoints.len() < 2 {
        return Err(TomTomError::validation(
            "At least two waypoints (origin and destination) are required",
        ));
    }
    for (index, waypoint) in waypoints.iter().enumerate() {
        check_coordinate(waypoint, &format!("Waypoint {}", index))?;
    }
    Ok(())
}

/// At least one budget must be defined. Zero counts as defined.
pub fn check_budget(budgets: [Option<f64>; 4]) -> TomTomResult<()> {
    if budgets.iter().all(Option::is_none) {
        return Err(TomTomError::validation(
            "At least one budget parameter (time, distance, energy, or fuel) must be provided",
        ));
    }
    Ok(())
}

/// Parses and validates a `minLon,minLat,maxLon,maxLat` string.
pub fn parse_bbox(bbox: &str) -> TomTomResult<BoundingBox> {
    let parts: Vec<&str> = bbox.split(',').collect();
    if parts.len() != 4 {
        return Err(TomTomError::validation(
            r#"Bounding box must be in format "minLon,minLat,maxLon,maxLat""#,
        ));
    }
    let values: Vec<f64> = parts
        .iter()
        .map(|part| part.trim().parse::<f64>().unwrap_or(f64::NAN))
        .collect();
    check_bbox(&values)
}

/// Validates a `[west, south, east, north]` slice.
pub fn check_bbox(values: &[f64]) -> TomTomResult<BoundingBox> {
    let &[west, south, east, north] = values else {
        return Err(TomTomError::validation(
            "Bounding box must have exactly 4 values: [west, south, east, north]",
        ));
    };

    if values.iter().any(|v| v.is_nan()) {
        return Err(TomTomError::validation(
            "All bounding box coordinates must be valid numbers",
        ));
    }
    if west >= east || south >= north {
        return Err(TomTomError::validation(
            "Invalid bounding box: min coordinates must be less than max coordinates",
        ));
    }
    if west < -180.0 || east > 180.0 || south < -90.0 || north > 90.0 {
        return Err(TomTomError::validation(
            "Bounding box coordinates must be within valid ranges (longitude: -180 to 180, latitude: -90 to 90)",
        ));
    }

    Ok(BoundingBox::from_checked(west, south, east, north))
}

/// Zoom must be a whole number in [0, 22].
pub fn check_zoom(zoom: f64) -> TomTomResult<()> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) || zoom.fract() != 0.0 {
        return Err(TomTomError::validation("Zoom level must be between 0 and 22"));
    }
    Ok(())
}

/// Image width or height in pixels, `name` is "Width" or "Height".
pub fn check_dimension(name: &str, pixels: f64) -> TomTomResult<()> {
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&pixels) {
        return Err(TomTomError::validation(format!(
            "{} must be between 1 and 8192 pixels",
            name
        )));
    }
    Ok(())
}

/// Traffic lookups need an area. Only the bbox path is implemented: a
/// query-only call is accepted by the schema but still rejected here.
pub fn require_traffic_area<'a>(
    bbox: Option<&'a str>,
    query: Option<&str>,
) -> TomTomResult<&'a str> {
    match (bbox.filter(|b| !b.is_empty()), query.filter(|q| !q.is_empty())) {
        (Some(bbox), _) => Ok(bbox),
        (None, None) => Err(TomTomError::validation(
            "Either bbox or query parameter must be provided",
        )),
        (None, Some(_)) => Err(TomTomError::validation(
            "Either 'bbox' or 'query' parameter must be provided",
        )),
    }
}

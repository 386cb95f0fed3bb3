//! Geographic value types shared by the TomTom request builders.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinate {
    /// Latitude coordinate (-90 to +90). Use precise coordinates from geocoding for best results.
    pub lat: f64,

    /// Longitude coordinate (-180 to +180). Use precise coordinates from geocoding for best results.
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `lon,lat` order, as the static map `center` parameter expects.
    pub fn lon_lat(&self) -> String {
        format!("{},{}", self.lon, self.lat)
    }
}

/// Formats as `lat,lon`, the order used by routing and reverse geocode paths.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// A validated `[west, south, east, north]` rectangle.
///
/// Only constructed through [`super::guards::check_bbox`] and
/// [`super::guards::parse_bbox`], so `west < east` and `south < north` hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

impl BoundingBox {
    /// Caller has already checked ordering and ranges.
    pub(super) fn from_checked(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn north(&self) -> f64 {
        self.north
    }
}

/// Formats as `west,south,east,north`.
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_orders() {
        let c = Coordinate::new(52.3731, 4.8922);
        assert_eq!(c.to_string(), "52.3731,4.8922");
        assert_eq!(c.lon_lat(), "4.8922,52.3731");
    }

    #[test]
    fn test_bbox_display() {
        let bbox = BoundingBox {
            west: 4.8,
            south: 52.3,
            east: 5.0,
            north: 52.4,
        };
        assert_eq!(bbox.to_string(), "4.8,52.3,5,52.4");
    }
}

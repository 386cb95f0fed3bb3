//! Search tools: geocoding, reverse geocoding, fuzzy, POI and nearby search.

pub mod fuzzy_search;
pub mod geocode;
pub mod nearby_search;
pub mod poi_search;
pub mod reverse_geocode;

pub use fuzzy_search::{FuzzySearchParams, FuzzySearchTool};
pub use geocode::{GeocodeParams, GeocodeTool};
pub use nearby_search::{NearbySearchParams, NearbySearchTool};
pub use poi_search::{PoiSearchParams, PoiSearchTool};
pub use reverse_geocode::{ReverseGeocodeParams, ReverseGeocodeTool};

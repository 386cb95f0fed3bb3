//! TomTom location services.
//!
//! Request builders, validation guards, the HTTP adapter and the error
//! classifier. Tool definitions call the service functions re-exported here.

pub mod classify;
pub mod client;
pub mod error;
pub mod geo;
pub mod guards;
pub mod map;
pub mod params;
pub mod request;
pub mod routing;
pub mod search;
pub mod traffic;

#[cfg(test)]
pub mod mock;

pub use client::{SharedApi, TomTomApi, TomTomClient, log_api_key_status};
pub use error::{ClassifiedError, ErrorKind, Outage, TomTomError, TomTomResult};
pub use geo::{BoundingBox, Coordinate};

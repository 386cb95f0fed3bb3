//! Traffic tools.

pub mod incidents;

pub use incidents::{TrafficIncidentsParams, TrafficIncidentsTool};

//! ev-trip-planner core
//!
//! Polyline decoding, range feasibility and charging-stop planning for
//! electric-vehicle trips. External services plug in through the traits.

pub mod traits;
pub mod geo;
pub mod polyline;
pub mod feasibility;
pub mod format;
pub mod planner;
pub mod osrm;
pub mod haversine;
pub mod stations;

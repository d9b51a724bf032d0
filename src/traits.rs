//! Seams to the external services a trip plan depends on.
//!
//! These are intentionally minimal. Concrete apps implement them over their
//! own directions API, station catalog and vehicle profile storage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feasibility::VehicleEnergyState;
use crate::geo::GeoPoint;

#[derive(Error, Debug)]
pub enum DirectionsError {
    #[error("Directions request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Directions service returned {code}: {message}")]
    Service { code: String, message: String },
    #[error("No route found between the requested points")]
    NoRoute,
}

/// A route as reported by a directions service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// Overview geometry in encoded polyline format.
    pub encoded_path: String,
}

impl RouteSummary {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}

/// A charging station candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
}

/// Computes a driving route through the given points.
pub trait DirectionsProvider {
    /// Waypoints are visited in order between origin and destination.
    fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        waypoints: &[GeoPoint],
    ) -> Result<RouteSummary, DirectionsError>;
}

/// Looks up charging stations around a point.
pub trait StationFinder {
    /// Stations within `radius_km` of `center`, nearest first.
    fn stations_near(&self, center: GeoPoint, radius_km: f64) -> Vec<Station>;
}

/// Provides the battery state for a vehicle, keyed by the app's vehicle id.
///
/// Returns `None` for unknown vehicles.
pub trait VehicleProfileStore {
    fn energy_state(&self, vehicle_id: &str) -> Option<VehicleEnergyState>;
}

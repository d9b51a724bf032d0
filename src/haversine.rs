//! Haversine directions provider (fallback when OSRM unavailable).
//!
//! Uses great-circle distance scaled by a circuity factor to estimate road
//! distance, and an assumed speed for travel time. The path is the straight
//! legs between the requested points. Less accurate than OSRM (ignores
//! roads) but always available.

use crate::geo::GeoPoint;
use crate::polyline;
use crate::traits::{DirectionsError, DirectionsProvider, RouteSummary};

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Ratio of road distance to straight-line distance.
const DEFAULT_CIRCUITY_FACTOR: f64 = 1.3;

#[derive(Debug, Clone)]
pub struct HaversineDirections {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
    pub circuity_factor: f64,
}

impl Default for HaversineDirections {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            circuity_factor: DEFAULT_CIRCUITY_FACTOR,
        }
    }
}

impl HaversineDirections {
    pub fn new(speed_kmh: f64, circuity_factor: f64) -> Self {
        Self {
            speed_kmh,
            circuity_factor,
        }
    }

    /// Convert distance in km to travel time in seconds.
    fn km_to_seconds(&self, km: f64) -> f64 {
        let hours = km / self.speed_kmh;
        (hours * 3600.0).round()
    }
}

impl DirectionsProvider for HaversineDirections {
    fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        waypoints: &[GeoPoint],
    ) -> Result<RouteSummary, DirectionsError> {
        let mut points = Vec::with_capacity(waypoints.len() + 2);
        points.push(origin);
        points.extend_from_slice(waypoints);
        points.push(destination);

        let straight_km: f64 = points
            .windows(2)
            .map(|leg| leg[0].haversine_km(&leg[1]))
            .sum();
        let road_km = straight_km * self.circuity_factor;

        Ok(RouteSummary {
            distance_meters: road_km * 1000.0,
            duration_seconds: self.km_to_seconds(road_km),
            encoded_path: polyline::encode(&points),
        })
    }
}

//! Trip planning with a single charging stop.
//!
//! Fetches a route, checks it against the vehicle's usable range and, when
//! the range falls short, reroutes through the charging station nearest to
//! the middle of the path.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::feasibility::{
    self, FeasibilityError, FeasibilityOptions, TripFeasibility, VehicleEnergyState,
};
use crate::geo::GeoPoint;
use crate::polyline::{Polyline, PolylineError};
use crate::traits::{DirectionsError, DirectionsProvider, RouteSummary, Station, StationFinder};

const DEFAULT_STATION_SEARCH_RADIUS_KM: f64 = 10.0;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Directions(#[from] DirectionsError),
    #[error("Route geometry could not be decoded: {0}")]
    Polyline(#[from] PolylineError),
    #[error(transparent)]
    Feasibility(#[from] FeasibilityError),
}

#[derive(Debug, Clone)]
pub struct PlannerOptions {
    pub feasibility: FeasibilityOptions,
    /// Radius around the stop location searched for stations.
    pub station_search_radius_km: f64,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            feasibility: FeasibilityOptions::default(),
            station_search_radius_km: DEFAULT_STATION_SEARCH_RADIUS_KM,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    /// The route to drive; passes through `charging_stop` when one is set.
    pub route: RouteSummary,
    pub path: Polyline,
    /// Feasibility of the direct route.
    pub feasibility: TripFeasibility,
    pub charging_stop: Option<Station>,
}

impl TripPlan {
    /// True when the direct route needs a stop but none could be found.
    pub fn is_stranded(&self) -> bool {
        !self.feasibility.has_sufficient_charge && self.charging_stop.is_none()
    }
}

/// Plans a trip from `origin` to `destination`.
///
/// When the direct route exceeds the usable range, stations are searched
/// around the path midpoint, or around `origin` when the route came back
/// without geometry. If none are found the direct route is returned with
/// no stop and the caller decides how to proceed.
pub fn plan_trip<D, S>(
    origin: GeoPoint,
    destination: GeoPoint,
    vehicle: &VehicleEnergyState,
    directions: &D,
    stations: &S,
    options: &PlannerOptions,
) -> Result<TripPlan, PlanError>
where
    D: DirectionsProvider,
    S: StationFinder,
{
    let route = directions.directions(origin, destination, &[])?;
    let path = Polyline::decode(&route.encoded_path)?;
    let feasibility = feasibility::evaluate(
        route.distance_km(),
        vehicle,
        path.points(),
        &options.feasibility,
    )?;

    debug!(
        distance_km = route.distance_km(),
        usable_range_km = feasibility.usable_range_km,
        sufficient = feasibility.has_sufficient_charge,
        "Evaluated direct route"
    );

    if feasibility.has_sufficient_charge {
        return Ok(TripPlan {
            route,
            path,
            feasibility,
            charging_stop: None,
        });
    }

    let search_center = match feasibility.required_stop_midpoint() {
        Some(point) => point,
        None => {
            warn!("Route has no geometry, searching for stations near the origin");
            origin
        }
    };

    let Some(station) = stations
        .stations_near(search_center, options.station_search_radius_km)
        .into_iter()
        .next()
    else {
        warn!(
            center = %search_center,
            radius_km = options.station_search_radius_km,
            "No charging station found near the stop location"
        );
        return Ok(TripPlan {
            route,
            path,
            feasibility,
            charging_stop: None,
        });
    };

    debug!(station = %station.id, "Rerouting through charging station");
    let rerouted = directions.directions(origin, destination, &[station.location])?;
    let rerouted_path = Polyline::decode(&rerouted.encoded_path)?;

    Ok(TripPlan {
        route: rerouted,
        path: rerouted_path,
        feasibility,
        charging_stop: Some(station),
    })
}

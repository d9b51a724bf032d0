//! Range feasibility for a single trip.
//!
//! Decides whether a vehicle reaches its destination on the current charge
//! and, when it does not, where along the path a charging stop should be
//! searched for.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::GeoPoint;

const DEFAULT_EFFICIENCY_KM_PER_KWH: f64 = 5.0;
const DEFAULT_SAFETY_MARGIN_FRACTION: f64 = 0.2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeasibilityError {
    #[error("Invalid vehicle state: {0}")]
    InvalidVehicleState(String),
    #[error("Invalid feasibility options: {0}")]
    InvalidOptions(String),
    #[error("Trip distance {0} km is not a finite, non-negative number")]
    InvalidTripDistance(f64),
}

/// Battery state of a vehicle, as read from its profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleEnergyState {
    pub battery_capacity_kwh: f64,
    /// State of charge in percent, `0..=100`.
    pub current_charge_percent: f64,
}

impl VehicleEnergyState {
    pub fn new(
        battery_capacity_kwh: f64,
        current_charge_percent: f64,
    ) -> Result<Self, FeasibilityError> {
        let state = Self {
            battery_capacity_kwh,
            current_charge_percent,
        };
        state.validate()?;
        Ok(state)
    }

    pub fn validate(&self) -> Result<(), FeasibilityError> {
        if !self.battery_capacity_kwh.is_finite() || self.battery_capacity_kwh <= 0.0 {
            return Err(FeasibilityError::InvalidVehicleState(format!(
                "battery capacity must be positive, got {} kWh",
                self.battery_capacity_kwh
            )));
        }
        if !(0.0..=100.0).contains(&self.current_charge_percent) {
            return Err(FeasibilityError::InvalidVehicleState(format!(
                "charge must be within 0..=100 percent, got {}",
                self.current_charge_percent
            )));
        }
        Ok(())
    }

    /// Range on the current charge before any safety margin.
    pub fn total_range_km(&self, efficiency_km_per_kwh: f64) -> f64 {
        self.battery_capacity_kwh * (self.current_charge_percent / 100.0) * efficiency_km_per_kwh
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityOptions {
    /// Distance driven per kWh.
    pub efficiency_km_per_kwh: f64,
    /// Share of the range withheld as a buffer, `0.0..1.0`.
    pub safety_margin_fraction: f64,
}

impl Default for FeasibilityOptions {
    fn default() -> Self {
        Self {
            efficiency_km_per_kwh: DEFAULT_EFFICIENCY_KM_PER_KWH,
            safety_margin_fraction: DEFAULT_SAFETY_MARGIN_FRACTION,
        }
    }
}

impl FeasibilityOptions {
    pub fn validate(&self) -> Result<(), FeasibilityError> {
        if !self.efficiency_km_per_kwh.is_finite() || self.efficiency_km_per_kwh <= 0.0 {
            return Err(FeasibilityError::InvalidOptions(format!(
                "efficiency must be positive, got {} km/kWh",
                self.efficiency_km_per_kwh
            )));
        }
        if !(0.0..1.0).contains(&self.safety_margin_fraction) {
            return Err(FeasibilityError::InvalidOptions(format!(
                "safety margin must be within 0..1, got {}",
                self.safety_margin_fraction
            )));
        }
        Ok(())
    }
}

/// Where a charging stop should be searched for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StopLocation {
    /// The trip fits in the usable range.
    NotRequired,
    /// Search near this point of the path.
    At(GeoPoint),
    /// A stop is required but the path was empty.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripFeasibility {
    pub has_sufficient_charge: bool,
    pub usable_range_km: f64,
    pub stop: StopLocation,
}

impl TripFeasibility {
    pub fn required_stop_midpoint(&self) -> Option<GeoPoint> {
        match self.stop {
            StopLocation::At(point) => Some(point),
            StopLocation::NotRequired | StopLocation::Unavailable => None,
        }
    }

    pub fn requires_stop(&self) -> bool {
        !self.has_sufficient_charge
    }
}

/// Evaluates whether `vehicle` covers `trip_distance_km` on its current
/// charge.
///
/// The trip is feasible only when the usable range strictly exceeds the
/// distance; exhausting the margin exactly still requires a stop. When a
/// stop is required, the candidate location is `path[len / 2]`.
pub fn evaluate(
    trip_distance_km: f64,
    vehicle: &VehicleEnergyState,
    path: &[GeoPoint],
    options: &FeasibilityOptions,
) -> Result<TripFeasibility, FeasibilityError> {
    vehicle.validate()?;
    options.validate()?;
    if !trip_distance_km.is_finite() || trip_distance_km < 0.0 {
        return Err(FeasibilityError::InvalidTripDistance(trip_distance_km));
    }

    let total_range_km = vehicle.total_range_km(options.efficiency_km_per_kwh);
    let usable_range_km = total_range_km * (1.0 - options.safety_margin_fraction);

    if usable_range_km > trip_distance_km {
        return Ok(TripFeasibility {
            has_sufficient_charge: true,
            usable_range_km,
            stop: StopLocation::NotRequired,
        });
    }

    let stop = match path.get(path.len() / 2) {
        Some(point) => StopLocation::At(*point),
        None => StopLocation::Unavailable,
    };

    Ok(TripFeasibility {
        has_sufficient_charge: false,
        usable_range_km,
        stop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_range() {
        let vehicle = VehicleEnergyState::new(60.0, 50.0).unwrap();
        assert_eq!(vehicle.total_range_km(5.0), 150.0);
    }

    #[test]
    fn test_zero_charge_needs_stop_even_for_zero_distance() {
        let vehicle = VehicleEnergyState::new(60.0, 0.0).unwrap();
        let result = evaluate(0.0, &vehicle, &[], &FeasibilityOptions::default()).unwrap();
        assert!(!result.has_sufficient_charge);
        assert_eq!(result.stop, StopLocation::Unavailable);
    }

    #[test]
    fn test_rejects_invalid_options() {
        let vehicle = VehicleEnergyState::new(60.0, 50.0).unwrap();
        let options = FeasibilityOptions {
            efficiency_km_per_kwh: 0.0,
            ..FeasibilityOptions::default()
        };
        assert!(matches!(
            evaluate(10.0, &vehicle, &[], &options),
            Err(FeasibilityError::InvalidOptions(_))
        ));

        let options = FeasibilityOptions {
            safety_margin_fraction: 1.0,
            ..FeasibilityOptions::default()
        };
        assert!(matches!(
            evaluate(10.0, &vehicle, &[], &options),
            Err(FeasibilityError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_rejects_negative_distance() {
        let vehicle = VehicleEnergyState::new(60.0, 50.0).unwrap();
        assert_eq!(
            evaluate(-1.0, &vehicle, &[], &FeasibilityOptions::default()),
            Err(FeasibilityError::InvalidTripDistance(-1.0))
        );
    }

    #[test]
    fn test_revalidates_public_fields() {
        let vehicle = VehicleEnergyState {
            battery_capacity_kwh: -5.0,
            current_charge_percent: 50.0,
        };
        assert!(matches!(
            evaluate(10.0, &vehicle, &[], &FeasibilityOptions::default()),
            Err(FeasibilityError::InvalidVehicleState(_))
        ));
    }
}

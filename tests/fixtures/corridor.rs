//! Locations along the Las Vegas to Los Angeles corridor.

use ev_trip_planner::geo::GeoPoint;
use ev_trip_planner::traits::Station;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng).expect("fixture coordinates are valid")
    }
}

pub const LAS_VEGAS: Location = Location::new("Las Vegas Strip", 36.1147, -115.1728);
pub const LOS_ANGELES: Location = Location::new("Downtown Los Angeles", 34.0522, -118.2437);
pub const HENDERSON: Location = Location::new("Henderson", 36.0395, -114.9817);

pub const STATIONS: &[Location] = &[
    Location::new("Barstow Station", 34.8958, -117.0173),
    Location::new("Baker Supercharger", 35.2656, -116.0746),
    Location::new("Primm Outlets", 35.6108, -115.3886),
];

pub fn stations() -> Vec<Station> {
    STATIONS
        .iter()
        .enumerate()
        .map(|(i, location)| Station {
            id: format!("st-{}", i),
            name: location.name.to_string(),
            location: location.point(),
        })
        .collect()
}

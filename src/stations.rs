//! In-memory charging station lookup.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::geo::GeoPoint;
use crate::traits::{Station, StationFinder};

/// A [`StationFinder`] over a fixed list of stations.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    stations: Vec<Station>,
}

impl StationIndex {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl StationFinder for StationIndex {
    fn stations_near(&self, center: GeoPoint, radius_km: f64) -> Vec<Station> {
        let mut candidates: Vec<(&Station, f64)> = self
            .stations
            .par_iter()
            .filter_map(|station| {
                let distance = center.haversine_km(&station.location);
                if distance <= radius_km {
                    Some((station, distance))
                } else {
                    None
                }
            })
            .collect();

        candidates.par_sort_unstable_by(|(a, da), (b, db)| {
            da.partial_cmp(db)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        candidates
            .into_iter()
            .map(|(station, _)| station.clone())
            .collect()
    }
}

use crate::Coordinate;
use crate::tour::{ACROPOLIS_STOPS, TourStop};

/// Samples closer than this to a stop (in degrees) auto-select it.
pub const AUTO_SELECT_RADIUS_DEG: f64 = 0.005;

pub const LOCATION_POLL_INTERVAL_MS: u32 = 10_000;

/// Straight-line distance in degree space. Not geodesic; good enough at the
/// scale of a single hilltop.
pub fn planar_distance_deg(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = a.lat - b.lat;
    let dlon = a.lon - b.lon;
    (dlat * dlat + dlon * dlon).sqrt()
}

/// Index and distance of the stop closest to `sample`. Ties go to the
/// earliest stop.
pub fn nearest_stop(stops: &[TourStop], sample: Coordinate) -> Option<(usize, f64)> {
    stops
        .iter()
        .enumerate()
        .map(|(idx, stop)| (idx, planar_distance_deg(stop.coordinate, sample)))
        .fold(None, |best, (idx, dist)| match best {
            Some((_, best_dist)) if best_dist <= dist => best,
            _ => Some((idx, dist)),
        })
}

/// The active stop of a non-empty tour.
#[derive(Debug, Clone, Copy)]
pub struct TourSelection<'a> {
    stops: &'a [TourStop],
    active: usize,
}

impl TourSelection<'static> {
    pub fn acropolis() -> Self {
        Self {
            stops: &ACROPOLIS_STOPS,
            active: 0,
        }
    }
}

impl<'a> TourSelection<'a> {
    /// Starts at the first stop. `None` for an empty tour.
    pub fn new(stops: &'a [TourStop]) -> Option<Self> {
        if stops.is_empty() {
            return None;
        }
        Some(Self { stops, active: 0 })
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &'a TourStop {
        &self.stops[self.active]
    }

    pub fn stops(&self) -> &'a [TourStop] {
        self.stops
    }

    /// Manual selection. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.stops.len() {
            return false;
        }
        self.active = index;
        true
    }

    /// Moves to the nearest stop when the sample lies inside
    /// [`AUTO_SELECT_RADIUS_DEG`], returning the new index.
    pub fn apply_sample(&mut self, sample: Coordinate) -> Option<usize> {
        let (idx, dist) = nearest_stop(self.stops, sample)?;
        if dist < AUTO_SELECT_RADIUS_DEG {
            self.active = idx;
            Some(idx)
        } else {
            None
        }
    }
}

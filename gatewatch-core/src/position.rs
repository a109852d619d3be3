use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair as reported by the location feed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Coordinate {
        Coordinate { lat, lng }
    }

    /// Planar distance in combined lat/lng units, the metric deciding whether
    /// a position change is worth animating.
    pub fn planar_distance_to(&self, other: &Coordinate) -> f64 {
        (self.lat - other.lat).hypot(self.lng - other.lng)
    }

    /// Both components exactly zero, the feed's stand-in for "no fix yet".
    pub fn is_zero(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }

    /// Linear interpolation towards `target`, `progress` in `[0, 1]`.
    pub fn lerp(&self, target: &Coordinate, progress: f64) -> Coordinate {
        Coordinate {
            lat: self.lat + (target.lat - self.lat) * progress,
            lng: self.lng + (target.lng - self.lng) * progress,
        }
    }
}

//! Waypoint representation
//!
//! Waypoints are stored latitude-first everywhere inside the crate. The
//! routing engine speaks longitude-first; the swap happens only through
//! [`Waypoint::to_lon_lat`] and [`Waypoint::from_lon_lat`] at the wire boundary.

use serde::{Deserialize, Serialize};

/// A geographic coordinate, latitude first.
///
/// Serializes as a `[lat, lon]` JSON pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
}

impl Waypoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Engine axis order: `[lon, lat]`
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// Inverse of [`Waypoint::to_lon_lat`]
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[1],
            lon: pair[0],
        }
    }
}

impl From<(f64, f64)> for Waypoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<Waypoint> for (f64, f64) {
    fn from(waypoint: Waypoint) -> Self {
        (waypoint.lat, waypoint.lon)
    }
}

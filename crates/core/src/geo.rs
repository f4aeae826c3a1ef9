//! Coordinate value type and great-circle distance.
//!
//! Distances are computed with the spherical law of cosines on a sphere
//! of radius [`EARTH_RADIUS_KM`]. Inputs are degrees; the result is in
//! kilometres.

use serde::{Deserialize, Serialize};

/// Earth radius in kilometres used for all distance computations.
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Spherical law of cosines:
/// `acos(cos(Δlon)·cos(lat_a)·cos(lat_b) + sin(lat_a)·sin(lat_b)) · R`.
///
/// The cosine argument is clamped to `[-1, 1]` so that identical points
/// cannot produce NaN from floating-point drift. Symmetric in its
/// arguments; `distance_km(a, a)` is `0.0`.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lon_a = a.longitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let lon_b = b.longitude.to_radians();

    let cos_angle = (lon_a - lon_b).cos() * lat_a.cos() * lat_b.cos() + lat_a.sin() * lat_b.sin();

    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM
}

/// Round a distance to one decimal place for display.
pub fn rounded_km(distance: f64) -> f64 {
    (distance * 10.0).round() / 10.0
}

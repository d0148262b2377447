//! Operational geometry computations.
//!
//! Pure numeric functions deriving the operation geometry from two lateral-limit
//! boundary points: arithmetic midpoint, initial great-circle bearing, direction
//! of attack, and the 180° angular sector used to constrain candidate points.
//! All functions are total for finite inputs.

use crate::api::{LatLon, OperationGeometry};

/// Mean Earth radius in nautical miles, used for haversine distances.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Arithmetic midpoint of two points.
///
/// This is a plain average of latitudes and longitudes, not a great-circle
/// midpoint; acceptable at the geographic scale of an area of operations.
pub fn midpoint(a: LatLon, b: LatLon) -> LatLon {
    LatLon {
        lat: (a.lat + b.lat) / 2.0,
        lon: (a.lon + b.lon) / 2.0,
    }
}

/// Initial bearing from `a` to `b` in degrees, normalized to [0, 360).
pub fn initial_bearing(a: LatLon, b: LatLon) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let diff_lon = (b.lon - a.lon).to_radians();

    let x = diff_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * diff_lon.cos();

    (x.atan2(y).to_degrees() + 360.0) % 360.0
}

/// Bearing rotated 90° clockwise, normalized to [0, 360).
pub fn perpendicular_bearing(bearing: f64) -> f64 {
    (bearing + 90.0) % 360.0
}

/// Great-circle distance between two points in nautical miles (haversine).
pub fn haversine_nm(a: LatLon, b: LatLon) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    EARTH_RADIUS_NM * 2.0 * h.sqrt().asin()
}

/// Whether `bearing` lies inside the sector `[min, max]`.
///
/// When `min > max` the sector wraps through 0°/360° and membership becomes
/// `bearing >= min OR bearing <= max`.
pub fn bearing_in_sector(bearing: f64, min: f64, max: f64) -> bool {
    if min > max {
        bearing >= min || bearing <= max
    } else {
        (min..=max).contains(&bearing)
    }
}

/// Derive the full operation geometry from two lateral-limit boundary points.
///
/// The direction of attack is 90° clockwise from the bearing A→B, and the
/// sector spans 180° centered on it: `(doa ∓ 90) mod 360`.
pub fn build_geometry(a: LatLon, b: LatLon) -> OperationGeometry {
    let center = midpoint(a, b);
    let lateral_bearing = initial_bearing(a, b);
    let doa = perpendicular_bearing(lateral_bearing);

    OperationGeometry {
        center,
        direction_of_attack_deg: doa,
        sector_min_bearing: (doa - 90.0 + 360.0) % 360.0,
        sector_max_bearing: (doa + 90.0) % 360.0,
    }
}

//! Geographic helpers: great-circle distance and display formatting

use haversine::{Location as HaversineLocation, Units, distance};

use crate::location::Coordinates;

/// Great-circle distance between two coordinate pairs in kilometers
#[must_use]
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let from_haversine = HaversineLocation {
        latitude: from.latitude,
        longitude: from.longitude,
    };
    let to_haversine = HaversineLocation {
        latitude: to.latitude,
        longitude: to.longitude,
    };
    distance(from_haversine, to_haversine, Units::Kilometers)
}

/// Format a non-negative distance for display.
///
/// Below one kilometer the distance renders as whole meters (ties to even),
/// otherwise as kilometers with one decimal place.
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round_ties_even() as i64)
    } else {
        format!("{km:.1}km")
    }
}

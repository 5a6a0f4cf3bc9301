//! Geolocation provider
//!
//! Wraps a platform location capability behind a small state machine with
//! persisted permission and fix state, so the UI can ask for the visitor's
//! position once and reuse it across sessions.

mod error;
mod provider;
mod source;

pub use error::{LocationError, LocationErrorKind};
pub use provider::{FRESHNESS_WINDOW, LocationProvider, LocationState};
pub use source::{FixedLocationSource, LocationSource, PermissionState, PositionOptions};

use serde::{Deserialize, Serialize};

/// A geographic coordinate pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_roundtrip() {
        let coords = Coordinates::new(27.3389, 88.5583);
        let json = serde_json::to_string(&coords).unwrap();
        let back: Coordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(coords, back);
    }
}

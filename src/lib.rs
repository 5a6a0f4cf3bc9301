//! `Gompa` - Catalog, search, and location services for the Sikkim
//! monastery heritage explorer
//!
//! This library provides the core functionality behind the explorer UI:
//! the monastery catalog with search, the geolocation provider, nearby
//! recommendations, the cultural events calendar, and weather snapshots.

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod geo;
pub mod location;
pub mod nearby;
pub mod storage;
pub mod weather;

// Re-export core types for public API
pub use catalog::{Catalog, District, Monastery, search_monasteries};
pub use config::GompaConfig;
pub use error::GompaError;
pub use events::{CulturalEvent, EventCalendar, EventType, search_events};
pub use geo::{distance_km, format_distance};
pub use location::{
    Coordinates, FixedLocationSource, LocationError, LocationProvider, LocationSource,
    LocationState, PermissionState, PositionOptions,
};
pub use nearby::{
    Attraction, Lodging, PlacesBackend, RecommendationService, RecommendationSet, Recommendations,
    SimulatedPlaces,
};
pub use storage::{KeyValueStore, MemoryStore, PersistentStore};
pub use weather::{SimulatedWeather, WeatherProvider, WeatherReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, GompaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

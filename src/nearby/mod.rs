//! Nearby lodging and attraction recommendations
//!
//! Stands in for a real places lookup: the backend trait takes one
//! coordinate pair and yields a full recommendation set, so a genuine
//! geospatial service can be wired in without touching callers.

mod places;
mod service;

pub use places::{PlacesBackend, PlacesError, SimulatedPlaces};
pub use service::{FETCH_FAILED_MESSAGE, RecommendationService, Recommendations};

use serde::{Deserialize, Serialize};

/// A lodging recommendation near the visitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lodging {
    pub id: String,
    pub name: String,
    pub rating: f64,
    /// Price band, e.g. "₹2,500/night"
    pub price_per_night: String,
    pub distance_km: f64,
    pub address: String,
    pub amenities: Vec<String>,
}

/// An attraction recommendation near the visitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attraction {
    pub id: String,
    pub name: String,
    pub category: String,
    pub rating: f64,
    pub distance_km: f64,
    pub address: String,
    pub description: String,
}

/// One complete set of recommendations; replaced wholesale on every
/// successful fetch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub lodging: Vec<Lodging>,
    pub attractions: Vec<Attraction>,
}

impl RecommendationSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lodging.is_empty() && self.attractions.is_empty()
    }
}

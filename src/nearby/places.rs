use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::{Attraction, Lodging, RecommendationSet};
use crate::geo::distance_km;
use crate::location::Coordinates;

/// Failure surfaced by a places backend
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Service error: {0}")]
    Service(String),
}

/// Places lookup capability.
///
/// Exactly one coordinate pair in, one complete recommendation set out; no
/// batching, no memory of previous calls.
#[async_trait]
pub trait PlacesBackend: Send + Sync {
    async fn nearby(
        &self,
        center: Coordinates,
    ) -> std::result::Result<RecommendationSet, PlacesError>;
}

struct LodgingSeed {
    id: &'static str,
    name: &'static str,
    rating: f64,
    price_per_night: &'static str,
    address: &'static str,
    amenities: &'static [&'static str],
    position: Coordinates,
}

struct AttractionSeed {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    rating: f64,
    address: &'static str,
    description: &'static str,
    position: Coordinates,
}

// Real places around Gangtok; distances are computed against the visitor's
// position so the simulated output stays coherent with the input coordinate.
const LODGING_SEEDS: [LodgingSeed; 4] = [
    LodgingSeed {
        id: "hotel-tibet",
        name: "Hotel Tibet",
        rating: 4.2,
        price_per_night: "₹2,500/night",
        address: "MG Road, Gangtok",
        amenities: &["WiFi", "Restaurant", "Mountain View"],
        position: Coordinates {
            latitude: 27.3301,
            longitude: 88.6127,
        },
    },
    LodgingSeed {
        id: "elgin-nor-khill",
        name: "The Elgin Nor-Khill",
        rating: 4.5,
        price_per_night: "₹8,500/night",
        address: "The Ridge, Gangtok",
        amenities: &["Spa", "Restaurant", "Heritage Property", "Garden"],
        position: Coordinates {
            latitude: 27.3347,
            longitude: 88.6111,
        },
    },
    LodgingSeed {
        id: "summit-norbiling",
        name: "Summit Norbiling Resort",
        rating: 4.1,
        price_per_night: "₹3,200/night",
        address: "Upper Syari, Gangtok",
        amenities: &["WiFi", "Restaurant", "Parking", "Spa"],
        position: Coordinates {
            latitude: 27.3224,
            longitude: 88.6263,
        },
    },
    LodgingSeed {
        id: "sonam-delek",
        name: "Hotel Sonam Delek",
        rating: 3.8,
        price_per_night: "₹1,800/night",
        address: "Tibet Road, Gangtok",
        amenities: &["WiFi", "Restaurant", "Travel Desk"],
        position: Coordinates {
            latitude: 27.3332,
            longitude: 88.6159,
        },
    },
];

const ATTRACTION_SEEDS: [AttractionSeed; 5] = [
    AttractionSeed {
        id: "tsomgo-lake",
        name: "Tsomgo Lake",
        category: "Natural Wonder",
        rating: 4.6,
        address: "East Sikkim",
        description: "Sacred glacial lake surrounded by snow-capped mountains",
        position: Coordinates {
            latitude: 27.3743,
            longitude: 88.7628,
        },
    },
    AttractionSeed {
        id: "nathula-pass",
        name: "Nathula Pass",
        category: "Historical Site",
        rating: 4.4,
        address: "Indo-China Border",
        description: "Historic trade route between India and Tibet",
        position: Coordinates {
            latitude: 27.3916,
            longitude: 88.8310,
        },
    },
    AttractionSeed {
        id: "ganesh-tok",
        name: "Ganesh Tok",
        category: "Viewpoint",
        rating: 4.1,
        address: "Gangtok",
        description: "Temple with panoramic views of Gangtok and Kanchenjunga",
        position: Coordinates {
            latitude: 27.3457,
            longitude: 88.6293,
        },
    },
    AttractionSeed {
        id: "mg-marg",
        name: "MG Marg",
        category: "Shopping & Entertainment",
        rating: 4.3,
        address: "Gangtok",
        description: "Pedestrian-only shopping street with cafes and shops",
        position: Coordinates {
            latitude: 27.3285,
            longitude: 88.6122,
        },
    },
    AttractionSeed {
        id: "hanuman-tok",
        name: "Hanuman Tok",
        category: "Religious Site",
        rating: 4.2,
        address: "Gangtok",
        description: "Temple dedicated to Lord Hanuman with scenic views",
        position: Coordinates {
            latitude: 27.3666,
            longitude: 88.6430,
        },
    },
];

/// Simulated places backend.
///
/// Synthesizes the recommendation set from a built-in table of places and
/// models service latency with an artificial delay. Every invocation is a
/// pure function of the input coordinate.
pub struct SimulatedPlaces {
    delay: Duration,
    limit: usize,
    fail_with: Option<String>,
}

impl SimulatedPlaces {
    /// Latency the real lookup typically shows
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    #[must_use]
    pub fn new() -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
            limit: usize::MAX,
            fail_with: None,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Cap each recommendation list at `limit` entries
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// A backend that fails every request; exercises the error path
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            limit: usize::MAX,
            fail_with: Some(message.into()),
        }
    }
}

impl Default for SimulatedPlaces {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlacesBackend for SimulatedPlaces {
    async fn nearby(
        &self,
        center: Coordinates,
    ) -> std::result::Result<RecommendationSet, PlacesError> {
        tokio::time::sleep(self.delay).await;

        if let Some(message) = &self.fail_with {
            return Err(PlacesError::Service(message.clone()));
        }

        let lodging = LODGING_SEEDS
            .iter()
            .take(self.limit)
            .map(|seed| Lodging {
                id: seed.id.to_string(),
                name: seed.name.to_string(),
                rating: seed.rating,
                price_per_night: seed.price_per_night.to_string(),
                distance_km: distance_km(center, seed.position),
                address: seed.address.to_string(),
                amenities: seed.amenities.iter().map(ToString::to_string).collect(),
            })
            .collect();

        let attractions = ATTRACTION_SEEDS
            .iter()
            .take(self.limit)
            .map(|seed| Attraction {
                id: seed.id.to_string(),
                name: seed.name.to_string(),
                category: seed.category.to_string(),
                rating: seed.rating,
                distance_km: distance_km(center, seed.position),
                address: seed.address.to_string(),
                description: seed.description.to_string(),
            })
            .collect();

        debug!(
            latitude = center.latitude,
            longitude = center.longitude,
            "synthesized recommendation set"
        );

        Ok(RecommendationSet {
            lodging,
            attractions,
        })
    }
}

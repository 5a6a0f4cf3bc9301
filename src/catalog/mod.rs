//! Monastery catalog data types and lookups
//!
//! This module provides the core data structures for representing monastery
//! records and the catalog loaded from the embedded static dataset.

mod search;

pub use search::search_monasteries;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GompaError;
use crate::location::Coordinates;
use crate::Result;

/// Administrative district of Sikkim a monastery belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum District {
    East,
    South,
    West,
    North,
}

impl District {
    /// All districts, in display order
    pub const ALL: [District; 4] = [
        District::East,
        District::South,
        District::West,
        District::North,
    ];
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            District::East => "East",
            District::South => "South",
            District::West => "West",
            District::North => "North",
        };
        write!(f, "{name}")
    }
}

/// Image asset references for a monastery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSet {
    pub hero: String,
    pub gallery: Vec<String>,
    pub panorama: Option<String>,
}

/// Per-language narration audio references; any language may be absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioTracks {
    pub en: Option<String>,
    pub hi: Option<String>,
    pub ne: Option<String>,
    pub lep: Option<String>,
    pub sik: Option<String>,
}

/// A single monastery record from the static dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monastery {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub district: District,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub summary: String,
    pub description: String,
    pub sect: String,
    pub founded: String,
    pub significance: String,
    pub visiting_hours: String,
    pub best_time_to_visit: String,
    pub nearest_town: String,
    pub distance_from_capital: String,
    pub tags: Vec<String>,
    pub images: ImageSet,
    pub audio: AudioTracks,
}

impl Monastery {
    /// Geographic position of the monastery
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// The full monastery catalog, immutable once loaded
#[derive(Debug, Clone)]
pub struct Catalog {
    monasteries: Vec<Monastery>,
}

const EMBEDDED_CATALOG: &str = include_str!("monasteries.json");

impl Catalog {
    /// Load the catalog shipped with the library
    pub fn load_embedded() -> Result<Self> {
        let records: Vec<Monastery> = serde_json::from_str(EMBEDDED_CATALOG)
            .map_err(|e| GompaError::catalog(format!("embedded catalog is malformed: {e}")))?;
        Self::from_records(records)
    }

    /// Build a catalog from records, validating the slug invariants
    pub fn from_records(monasteries: Vec<Monastery>) -> Result<Self> {
        let mut seen = HashSet::new();
        for monastery in &monasteries {
            if !is_url_safe_slug(&monastery.slug) {
                return Err(GompaError::catalog(format!(
                    "slug '{}' is not URL-safe",
                    monastery.slug
                )));
            }
            if !seen.insert(monastery.slug.as_str()) {
                return Err(GompaError::catalog(format!(
                    "duplicate slug '{}'",
                    monastery.slug
                )));
            }
        }
        Ok(Self { monasteries })
    }

    /// All records in catalog order
    #[must_use]
    pub fn all(&self) -> &[Monastery] {
        &self.monasteries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.monasteries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monasteries.is_empty()
    }

    /// Look up a monastery by its URL slug
    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&Monastery> {
        self.monasteries.iter().find(|m| m.slug == slug)
    }

    /// All monasteries in a district, in catalog order
    #[must_use]
    pub fn by_district(&self, district: District) -> Vec<&Monastery> {
        self.monasteries
            .iter()
            .filter(|m| m.district == district)
            .collect()
    }

    /// Distinct sect labels in first-appearance order, for filter controls
    #[must_use]
    pub fn sects(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.monasteries
            .iter()
            .map(|m| m.sect.as_str())
            .filter(|sect| seen.insert(*sect))
            .collect()
    }
}

/// A slug is URL-safe when it is non-empty lowercase ASCII alphanumerics
/// separated by single hyphens
fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

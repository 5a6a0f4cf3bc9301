use std::time::Duration;

use async_trait::async_trait;

use super::{Coordinates, LocationError};

/// Request configuration handed to the platform capability
#[derive(Debug, Clone, Copy)]
pub struct PositionOptions {
    /// Prefer a high-accuracy fix when the platform offers the choice
    pub high_accuracy: bool,
    /// Give up on the request after this long
    pub timeout: Duration,
    /// A platform-level cached fix no older than this may be reused
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

/// Result of the platform's permission query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Prompt,
    Denied,
}

/// Platform location capability.
///
/// One async position request plus a permission query; the callback shape
/// of any concrete platform API is an adapter concern, not part of this
/// contract.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Whether the platform offers a location capability at all
    fn is_supported(&self) -> bool {
        true
    }

    /// Current permission state, `Prompt` when undetermined
    async fn permission_state(&self) -> PermissionState;

    /// Resolve the current position, honoring `options`
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> std::result::Result<Coordinates, LocationError>;
}

/// Source that always resolves to a preset fix; used by the demo binary
/// and as a convenient test double.
#[derive(Debug, Clone)]
pub struct FixedLocationSource {
    coordinates: Coordinates,
}

impl FixedLocationSource {
    #[must_use]
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationSource for FixedLocationSource {
    async fn permission_state(&self) -> PermissionState {
        PermissionState::Granted
    }

    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> std::result::Result<Coordinates, LocationError> {
        Ok(self.coordinates)
    }
}

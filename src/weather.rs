//! Weather snapshot provider
//!
//! Monastery detail views show current conditions at altitude. The shipped
//! provider is simulated: it derives a plausible snapshot from the
//! coordinate alone, so the same trait can later front a real forecast
//! service without changing callers.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::location::Coordinates;

/// Current conditions at a coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature_c: i32,
    pub condition: String,
    pub wind_speed_kmh: u32,
    /// Relative humidity percentage
    pub humidity: u8,
}

/// Failure surfaced by a weather provider
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Weather service unavailable: {0}")]
    Unavailable(String),
}

/// Weather lookup capability
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(
        &self,
        coordinates: Coordinates,
    ) -> std::result::Result<WeatherReport, WeatherError>;
}

/// Simulated weather provider.
///
/// A pure function of the input coordinate: temperature follows a latitude
/// lapse away from the valley floor, the remaining fields are derived from
/// a coordinate hash so nearby points get stable, varied conditions.
pub struct SimulatedWeather {
    delay: Duration,
    fail_with: Option<String>,
}

impl SimulatedWeather {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    #[must_use]
    pub fn new() -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
            fail_with: None,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// A provider that fails every request; exercises the error path
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            fail_with: Some(message.into()),
        }
    }
}

impl Default for SimulatedWeather {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable hash over the coordinate rounded to ~10 m, folded into `range`
fn coordinate_jitter(coordinates: Coordinates, salt: u64, range: u64) -> u64 {
    let lat = (coordinates.latitude * 1e4).round() as i64 as u64;
    let lon = (coordinates.longitude * 1e4).round() as i64 as u64;
    let mut hash = 0xcbf2_9ce4_8422_2325_u64 ^ salt;
    for word in [lat, lon] {
        hash ^= word;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash % range
}

#[async_trait]
impl WeatherProvider for SimulatedWeather {
    async fn current(
        &self,
        coordinates: Coordinates,
    ) -> std::result::Result<WeatherReport, WeatherError> {
        tokio::time::sleep(self.delay).await;

        if let Some(message) = &self.fail_with {
            return Err(WeatherError::Unavailable(message.clone()));
        }

        let base = 15.0 - (coordinates.latitude - 27.0) * 10.0;
        let temperature_c = (base + coordinate_jitter(coordinates, 0, 10) as f64).round() as i32;
        let condition = if coordinate_jitter(coordinates, 1, 2) == 0 {
            "Clear"
        } else {
            "Partly Cloudy"
        };
        let wind_speed_kmh = 5 + coordinate_jitter(coordinates, 2, 15) as u32;
        let humidity = 60 + coordinate_jitter(coordinates, 3, 30) as u8;

        debug!(temperature_c, condition, "simulated weather snapshot");

        Ok(WeatherReport {
            temperature_c,
            condition: condition.to_string(),
            wind_speed_kmh,
            humidity,
        })
    }
}

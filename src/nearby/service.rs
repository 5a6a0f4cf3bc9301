use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{PlacesBackend, RecommendationSet};
use crate::location::{Coordinates, LocationState};

/// User-facing message shown when a fetch fails
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch recommendations. Please try again.";

/// Loading / error / data snapshot exposed to the presentation layer
#[derive(Debug, Clone, Default)]
pub struct Recommendations {
    pub data: RecommendationSet,
    pub loading: bool,
    pub error: Option<String>,
}

/// Tri-state wrapper around a places backend.
///
/// A successful fetch replaces the previous set wholesale; a failed fetch
/// records the user-facing error and leaves the previous set untouched.
pub struct RecommendationService<P> {
    backend: P,
    inner: Mutex<Recommendations>,
}

impl<P: PlacesBackend> RecommendationService<P> {
    #[must_use]
    pub fn new(backend: P) -> Self {
        Self {
            backend,
            inner: Mutex::new(Recommendations::default()),
        }
    }

    /// Current tri-state snapshot
    pub async fn snapshot(&self) -> Recommendations {
        self.inner.lock().await.clone()
    }

    /// Fetch recommendations for `center`, replacing the current set on
    /// success.
    pub async fn refresh(&self, center: Coordinates) -> Recommendations {
        {
            let mut inner = self.inner.lock().await;
            inner.loading = true;
            inner.error = None;
        }

        let outcome = self.backend.nearby(center).await;

        let mut inner = self.inner.lock().await;
        inner.loading = false;
        match outcome {
            Ok(set) => {
                debug!(
                    lodging = set.lodging.len(),
                    attractions = set.attractions.len(),
                    "recommendations refreshed"
                );
                inner.data = set;
            }
            Err(error) => {
                warn!(%error, "recommendation fetch failed");
                inner.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        inner.clone()
    }

    /// Fetch recommendations for a resolved location.
    ///
    /// The pipeline only fires once the provider holds a complete
    /// coordinate pair; any other state is a no-op.
    pub async fn refresh_from(&self, location: &LocationState) -> Option<Recommendations> {
        let coords = location.coordinates()?;
        Some(self.refresh(coords).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationError;
    use crate::nearby::SimulatedPlaces;
    use std::time::Duration;

    fn gangtok() -> Coordinates {
        Coordinates::new(27.3314, 88.6138)
    }

    fn instant_backend() -> SimulatedPlaces {
        SimulatedPlaces::new().with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_refresh_replaces_set_wholesale() {
        let service = RecommendationService::new(instant_backend());
        assert!(service.snapshot().await.data.is_empty());

        let snapshot = service.refresh(gangtok()).await;
        assert!(!snapshot.data.is_empty());
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());

        // distances change with the coordinate: the old set is replaced,
        // not merged
        let moved = service.refresh(Coordinates::new(27.3005, 88.2402)).await;
        assert_eq!(moved.data.lodging.len(), snapshot.data.lodging.len());
        assert!(moved.data.lodging[0].distance_km > snapshot.data.lodging[0].distance_km);
    }

    struct FlakyBackend {
        delegate: SimulatedPlaces,
        fail: std::sync::atomic::AtomicBool,
    }

    #[async_trait::async_trait]
    impl PlacesBackend for FlakyBackend {
        async fn nearby(
            &self,
            center: Coordinates,
        ) -> std::result::Result<RecommendationSet, super::super::PlacesError> {
            if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(super::super::PlacesError::Network("connection reset".into()));
            }
            self.delegate.nearby(center).await
        }
    }

    #[tokio::test]
    async fn test_failure_preserves_previous_set() {
        let backend = FlakyBackend {
            delegate: instant_backend(),
            fail: std::sync::atomic::AtomicBool::new(false),
        };
        let service = RecommendationService::new(backend);

        let before = service.refresh(gangtok()).await;
        assert!(!before.data.is_empty());

        service
            .backend
            .fail
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let after = service.refresh(gangtok()).await;

        assert_eq!(after.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(!after.loading);
        // stale-but-present beats blank: the old set is still there
        assert_eq!(after.data.lodging.len(), before.data.lodging.len());
        assert_eq!(after.data.attractions.len(), before.data.attractions.len());
    }

    #[tokio::test]
    async fn test_refresh_from_requires_granted_state() {
        let service = RecommendationService::new(instant_backend());

        assert!(
            service
                .refresh_from(&LocationState::Unrequested)
                .await
                .is_none()
        );
        assert!(
            service
                .refresh_from(&LocationState::Requesting)
                .await
                .is_none()
        );
        assert!(
            service
                .refresh_from(&LocationState::Denied(LocationError::timeout()))
                .await
                .is_none()
        );
        assert!(service.snapshot().await.data.is_empty());

        let snapshot = service
            .refresh_from(&LocationState::Granted(gangtok()))
            .await
            .unwrap();
        assert!(!snapshot.data.is_empty());
    }

    #[tokio::test]
    async fn test_new_refresh_clears_stale_error() {
        let service = RecommendationService::new(instant_backend());
        {
            let mut inner = service.inner.lock().await;
            inner.error = Some(FETCH_FAILED_MESSAGE.to_string());
        }
        let snapshot = service.refresh(gangtok()).await;
        assert!(snapshot.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flag_during_fetch() {
        let service =
            RecommendationService::new(SimulatedPlaces::new().with_delay(Duration::from_millis(50)));

        let refresh = service.refresh(gangtok());
        let observe = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            service.snapshot().await
        };
        let (done, mid_flight) = tokio::join!(refresh, observe);

        assert!(mid_flight.loading);
        assert!(!done.loading);
    }
}

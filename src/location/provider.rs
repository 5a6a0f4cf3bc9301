use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{Coordinates, LocationError, LocationSource, PermissionState, PositionOptions};
use crate::storage::KeyValueStore;
use crate::Result;

const KEY_FIX: &str = "gompa:location:fix";
const KEY_PERMISSION: &str = "gompa:location:permission_granted";
const KEY_TIMESTAMP: &str = "gompa:location:timestamp";

/// A persisted fix older than this is never reused without a fresh request
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Observable state of the provider
#[derive(Debug, Clone, PartialEq)]
pub enum LocationState {
    Unrequested,
    Requesting,
    Granted(Coordinates),
    Denied(LocationError),
}

impl LocationState {
    /// The resolved coordinate pair, if any
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            LocationState::Granted(coords) => Some(*coords),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&LocationError> {
        match self {
            LocationState::Denied(error) => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, LocationState::Requesting)
    }
}

/// Geolocation provider over an injected store and platform source.
///
/// Persists the coordinate fix, permission flag, and capture timestamp so a
/// later session can restore a fresh fix or silently re-request a stale one.
pub struct LocationProvider<S, L> {
    store: S,
    source: L,
    options: PositionOptions,
    freshness: Duration,
    state: Mutex<LocationState>,
    has_permission: AtomicBool,
    // Overlapping requests race on the single state slot; every request
    // takes a token and only the most recent one may commit its outcome.
    request_seq: AtomicU64,
}

impl<S, L> LocationProvider<S, L>
where
    S: KeyValueStore,
    L: LocationSource,
{
    #[must_use]
    pub fn new(store: S, source: L) -> Self {
        Self {
            store,
            source,
            options: PositionOptions::default(),
            freshness: FRESHNESS_WINDOW,
            state: Mutex::new(LocationState::Unrequested),
            has_permission: AtomicBool::new(false),
            request_seq: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness = window;
        self
    }

    /// Current observable state
    pub async fn state(&self) -> LocationState {
        self.state.lock().await.clone()
    }

    /// The resolved coordinates, if a fix has been granted
    pub async fn coordinates(&self) -> Option<Coordinates> {
        self.state.lock().await.coordinates()
    }

    #[must_use]
    pub fn has_permission(&self) -> bool {
        self.has_permission.load(Ordering::SeqCst)
    }

    /// Restore persisted state from the store.
    ///
    /// A fix within the freshness window is adopted directly. A stale or
    /// missing fix triggers a silent re-request, but only when both the
    /// persisted permission flag and the platform's own permission query
    /// agree that access was already granted.
    pub async fn initialize(&self) -> Result<LocationState> {
        let fix: Option<Coordinates> = self.store.get(KEY_FIX).await?;
        let timestamp: Option<i64> = self.store.get(KEY_TIMESTAMP).await?;
        let granted: bool = self.store.get(KEY_PERMISSION).await?.unwrap_or(false);
        self.has_permission.store(granted, Ordering::SeqCst);

        if let (Some(coords), Some(captured_at)) = (fix, timestamp) {
            let age_ms = Utc::now().timestamp_millis().saturating_sub(captured_at);
            if age_ms >= 0 && u128::try_from(age_ms).unwrap_or(u128::MAX) < self.freshness.as_millis()
            {
                debug!(age_ms, "restored fix within freshness window");
                let mut state = self.state.lock().await;
                *state = LocationState::Granted(coords);
                return Ok(state.clone());
            }
            debug!(age_ms, "stored fix is stale");
        }

        if granted && self.source.permission_state().await == PermissionState::Granted {
            debug!("permission already granted, re-requesting silently");
            return self.request_location().await;
        }

        Ok(self.state().await)
    }

    /// Explicit "request location" action.
    ///
    /// On success the fix, permission flag, and capture timestamp are
    /// persisted. On a platform failure the persisted fix and permission
    /// flag are cleared and the structured error lands in `Denied`. A newer
    /// request supersedes an outstanding one; the older response is dropped.
    pub async fn request_location(&self) -> Result<LocationState> {
        if !self.source.is_supported() {
            warn!("location requested on a platform without location support");
            let mut state = self.state.lock().await;
            *state = LocationState::Denied(LocationError::unsupported());
            return Ok(state.clone());
        }

        let token = self.request_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            *state = LocationState::Requesting;
        }

        let outcome = self.source.current_position(self.options).await;

        if self.request_seq.load(Ordering::SeqCst) != token {
            debug!("discarding superseded location response");
            return Ok(self.state().await);
        }

        match outcome {
            Ok(coords) => {
                let captured_at = Utc::now().timestamp_millis();
                self.store.put(KEY_FIX, &coords).await?;
                self.store.put(KEY_PERMISSION, &true).await?;
                self.store.put(KEY_TIMESTAMP, &captured_at).await?;
                self.has_permission.store(true, Ordering::SeqCst);
                info!(
                    latitude = coords.latitude,
                    longitude = coords.longitude,
                    "location fix acquired"
                );
                let mut state = self.state.lock().await;
                *state = LocationState::Granted(coords);
                Ok(state.clone())
            }
            Err(error) => {
                self.store.remove(KEY_FIX).await?;
                self.store.remove(KEY_PERMISSION).await?;
                self.has_permission.store(false, Ordering::SeqCst);
                warn!(code = error.code, message = %error.message, "location request failed");
                let mut state = self.state.lock().await;
                *state = LocationState::Denied(error);
                Ok(state.clone())
            }
        }
    }

    /// Reset to a never-requested provider, wiping every persisted field.
    pub async fn clear_location(&self) -> Result<()> {
        // also invalidates any in-flight request
        self.request_seq.fetch_add(1, Ordering::SeqCst);
        self.store.remove(KEY_FIX).await?;
        self.store.remove(KEY_PERMISSION).await?;
        self.store.remove(KEY_TIMESTAMP).await?;
        self.has_permission.store(false, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        *state = LocationState::Unrequested;
        debug!("location state cleared");
        Ok(())
    }
}

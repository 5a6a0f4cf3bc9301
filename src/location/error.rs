use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured location failure, carrying the platform's numeric error code
/// alongside the message so callers can branch on either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message} (code {code})")]
pub struct LocationError {
    pub code: u16,
    pub message: String,
}

/// The platform error code space: 0 is reserved for a platform with no
/// location capability at all, 1-3 follow the conventional geolocation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationErrorKind {
    Unsupported,
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Other,
}

impl LocationError {
    pub const CODE_UNSUPPORTED: u16 = 0;
    pub const CODE_PERMISSION_DENIED: u16 = 1;
    pub const CODE_POSITION_UNAVAILABLE: u16 = 2;
    pub const CODE_TIMEOUT: u16 = 3;

    #[must_use]
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Terminal error for a platform with no location capability
    #[must_use]
    pub fn unsupported() -> Self {
        Self::new(
            Self::CODE_UNSUPPORTED,
            "Location is not supported on this platform.",
        )
    }

    #[must_use]
    pub fn permission_denied() -> Self {
        Self::new(
            Self::CODE_PERMISSION_DENIED,
            "Permission to access location was denied.",
        )
    }

    #[must_use]
    pub fn position_unavailable() -> Self {
        Self::new(
            Self::CODE_POSITION_UNAVAILABLE,
            "The current position could not be determined.",
        )
    }

    #[must_use]
    pub fn timeout() -> Self {
        Self::new(Self::CODE_TIMEOUT, "The location request timed out.")
    }

    #[must_use]
    pub fn kind(&self) -> LocationErrorKind {
        match self.code {
            Self::CODE_UNSUPPORTED => LocationErrorKind::Unsupported,
            Self::CODE_PERMISSION_DENIED => LocationErrorKind::PermissionDenied,
            Self::CODE_POSITION_UNAVAILABLE => LocationErrorKind::PositionUnavailable,
            Self::CODE_TIMEOUT => LocationErrorKind::Timeout,
            _ => LocationErrorKind::Other,
        }
    }
}

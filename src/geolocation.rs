//! One-shot "current position" providers
//!
//! Failure is never fatal: callers fall back to unranked results and show
//! [`GeolocationError::notice`] as an informational message.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Coordinate;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("geolocation not supported")]
    Unsupported,
}

impl GeolocationError {
    /// Message shown to the user in place of distances
    #[must_use]
    pub fn notice(&self) -> &'static str {
        match self {
            GeolocationError::PermissionDenied => {
                "Location permission denied. Showing popular places."
            }
            GeolocationError::Unsupported => "Geolocation not supported.",
        }
    }
}

#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Provider with a predetermined answer, e.g. coordinates passed on a request
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocation(Result<Coordinate, GeolocationError>);

impl FixedGeolocation {
    #[must_use]
    pub fn at(coordinate: Coordinate) -> Self {
        Self(Ok(coordinate))
    }

    #[must_use]
    pub fn denied() -> Self {
        Self(Err(GeolocationError::PermissionDenied))
    }

    #[must_use]
    pub fn unsupported() -> Self {
        Self(Err(GeolocationError::Unsupported))
    }
}

impl From<Option<Coordinate>> for FixedGeolocation {
    fn from(coordinate: Option<Coordinate>) -> Self {
        coordinate.map_or_else(Self::unsupported, Self::at)
    }
}

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.0
    }
}

//! Where the patient is.
//!
//! Acquiring a position (device GPS, browser geolocation, an address lookup)
//! happens outside this crate. A [`LocationSource`] is whatever the caller has
//! for it: a known [`Location`], an already-settled result, or a pending
//! lookup of its own.

use std::future::Future;
use thiserror::Error;
use waitroom_geo::Location;

/// Why no location could be obtained
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The provider could not produce a position
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    /// The user declined to share a position
    #[error("Location permission denied")]
    PermissionDenied,

    /// The provider did not answer in time
    #[error("Location request timed out")]
    Timeout,
}

/// A one-shot provider of the user's location
pub trait LocationSource: Send {
    /// Resolve to a location or fail
    fn resolve(self) -> impl Future<Output = Result<Location, LocationError>> + Send;
}

impl LocationSource for Location {
    fn resolve(self) -> impl Future<Output = Result<Location, LocationError>> + Send {
        std::future::ready(Ok(self))
    }
}

impl LocationSource for Result<Location, LocationError> {
    fn resolve(self) -> impl Future<Output = Result<Location, LocationError>> + Send {
        std::future::ready(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_location_resolves_to_itself() {
        let here = Location::new(53.5461, -113.4938);
        assert_eq!(here.resolve().await, Ok(here));
    }

    #[tokio::test]
    async fn test_settled_result_resolves_as_is() {
        let failed: Result<Location, LocationError> = Err(LocationError::PermissionDenied);
        assert_eq!(failed.resolve().await, Err(LocationError::PermissionDenied));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LocationError::Unavailable("no GPS fix".into()).to_string(),
            "Location unavailable: no GPS fix"
        );
        assert_eq!(LocationError::Timeout.to_string(), "Location request timed out");
    }
}

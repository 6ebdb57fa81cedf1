//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Map link contains no recognizable coordinate pair
    #[error("Invalid map link: {0}")]
    InvalidMapLink(String),

    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Error code for integration with waitroom-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Map link contains no coordinate pair
    InvalidMapLink = 10001,
    /// Invalid coordinate values
    InvalidCoordinate = 10002,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidMapLink(_) => GeoErrorCode::InvalidMapLink,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
        }
    }
}

//! Error types for the query pipeline
//!
//! Only the two failures that abort a query live here. Per-record problems
//! (bad map links, unreadable waits, unknown cities) are absorbed during
//! enrichment and never surface as errors.

use crate::location::LocationError;
use thiserror::Error;
use waitroom_core::{Error as CoreError, ErrorCode};
use waitroom_feed::FeedError;

/// Result type alias for query operations
pub type Result<T> = std::result::Result<T, QueryError>;

/// Failures that abort a whole query
#[derive(Error, Debug)]
pub enum QueryError {
    /// The user's location could not be resolved
    #[error("Could not resolve user location: {0}")]
    LocationUnavailable(#[from] LocationError),

    /// The wait-time feed could not be fetched or was not a city map
    #[error("Could not fetch wait-time feed: {0}")]
    FeedUnreachable(#[from] FeedError),
}

impl QueryError {
    /// Map onto the shared error codes
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::LocationUnavailable(_) => ErrorCode::LocationUnavailable,
            Self::FeedUnreachable(e) => e.code(),
        }
    }

    /// Convert into the coded error used for reports
    #[must_use]
    pub fn into_core(self) -> CoreError {
        match self {
            Self::LocationUnavailable(e) => {
                CoreError::location_unavailable(e.to_string()).with_source(e)
            }
            Self::FeedUnreachable(e) => CoreError::feed(e.code(), e.to_string()).with_source(e),
        }
    }
}

//! Error types for the feed client

use thiserror::Error;
use waitroom_core::ErrorCode;

/// Result type alias for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Feed client errors
#[derive(Error, Debug)]
pub enum FeedError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot file could not be read
    #[error("Failed to read feed snapshot {path}: {source}")]
    Io {
        /// Snapshot path
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Feed returned a non-success status
    #[error("Feed error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Payload parsed but is not the expected shape
    #[error("Malformed feed payload: {0}")]
    MalformedPayload(String),
}

impl FeedError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status >= 500)
    }

    /// Map onto the shared error codes
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Request(e) if e.is_timeout() => ErrorCode::Timeout,
            Self::Request(_) | Self::Io { .. } => ErrorCode::FeedUnreachable,
            Self::Json(_) | Self::MalformedPayload(_) => ErrorCode::FeedMalformed,
            Self::Status { .. } => ErrorCode::FeedRejected,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(FeedError::status(404, "not found").is_client_error());
        assert!(!FeedError::status(404, "not found").is_server_error());
        assert!(FeedError::status(503, "unavailable").is_server_error());
        assert!(!FeedError::MalformedPayload("array".into()).is_client_error());
    }

    #[test]
    fn test_codes() {
        assert_eq!(FeedError::status(500, "").code(), ErrorCode::FeedRejected);
        assert_eq!(FeedError::MalformedPayload(String::new()).code(), ErrorCode::FeedMalformed);
        assert_eq!(FeedError::config("x").code(), ErrorCode::ConfigError);
    }
}

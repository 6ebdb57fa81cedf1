//! Feed sources
//!
//! [`WaitTimeFeed`] is the seam the query service depends on. [`HttpFeed`]
//! talks to the live endpoint; [`StaticFeed`] serves a fixed snapshot, e.g.
//! one saved to disk for offline runs or a fixture in tests.
//!
//! [`HttpFeed`]: crate::HttpFeed

use crate::error::{FeedError, FeedResult};
use serde_json::Value;
use std::future::Future;
use std::path::Path;

/// A source of wait-time feed payloads
pub trait WaitTimeFeed: Send + Sync {
    /// Fetch the whole feed. The returned value is always a JSON object.
    fn fetch(&self) -> impl Future<Output = FeedResult<Value>> + Send;
}

/// A feed serving a fixed payload
#[derive(Debug, Clone)]
pub struct StaticFeed {
    payload: Value,
}

impl StaticFeed {
    /// Wrap an in-memory payload
    #[must_use]
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    /// Load a snapshot saved as JSON
    pub fn from_path(path: impl AsRef<Path>) -> FeedResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(serde_json::from_str(&content)?))
    }
}

impl WaitTimeFeed for StaticFeed {
    fn fetch(&self) -> impl Future<Output = FeedResult<Value>> + Send {
        std::future::ready(ensure_object(self.payload.clone()))
    }
}

/// Reject payloads whose root is not a city-keyed object
pub(crate) fn ensure_object(payload: Value) -> FeedResult<Value> {
    if payload.is_object() {
        Ok(payload)
    } else {
        Err(FeedError::MalformedPayload(format!(
            "expected a JSON object keyed by city, got {}",
            json_kind(&payload)
        )))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

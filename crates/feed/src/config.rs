//! Configuration for the feed client
//!
//! Supports file, environment and builder configuration with sensible defaults.

use crate::error::{FeedError, FeedResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use waitroom_core::config::{DEFAULT_FEED_URL, FeedSection};

/// Feed client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed URL
    pub url: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::from_section(&FeedSection::default())
    }
}

impl FeedConfig {
    /// Build from the `[feed]` section of the configuration file
    #[must_use]
    pub fn from_section(section: &FeedSection) -> Self {
        Self {
            url: section.url.clone(),
            timeout: Duration::from_secs(section.timeout_secs),
            user_agent: section.user_agent.clone(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `WAITROOM_FEED_URL`: feed URL
    /// - `WAITROOM_TIMEOUT_SECS`: request timeout in seconds
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `WAITROOM_*` environment overrides on top of this configuration
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("WAITROOM_FEED_URL") {
            self.url = url;
        }

        if let Some(timeout) = env::var("WAITROOM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
        {
            self.timeout = timeout;
        }

        self
    }

    /// Builder-style method to set the feed URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the User-Agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> FeedResult<()> {
        if self.url.is_empty() {
            return Err(FeedError::config("url cannot be empty"));
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(FeedError::config("url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(FeedError::config("timeout cannot be zero"));
        }

        Ok(())
    }

    /// Whether this points at the public default feed
    #[must_use]
    pub fn is_default_feed(&self) -> bool {
        self.url == DEFAULT_FEED_URL
    }
}

//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default public wait-time feed
pub const DEFAULT_FEED_URL: &str =
    "https://www.albertahealthservices.ca/Webapps/WaitTimes/api/waittimes";

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Wait-time feed settings
    #[serde(default)]
    pub feed: FeedSection,

    /// Ranking and summary settings
    #[serde(default)]
    pub ranking: RankingSection,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl ConfigSchema {
    /// Check values serde cannot constrain
    pub fn validate(&self) -> Result<()> {
        if self.feed.url.trim().is_empty() {
            return Err(Error::config_validation("feed.url cannot be empty"));
        }
        if self.feed.timeout_secs == 0 {
            return Err(Error::config_validation("feed.timeout_secs cannot be zero"));
        }
        if self.ranking.top_count == 0 {
            return Err(Error::config_validation("ranking.top_count must be at least 1"));
        }
        if let Some(max) = self.ranking.default_max_distance_km {
            if !max.is_finite() || max < 0.0 {
                return Err(Error::config_validation(
                    "ranking.default_max_distance_km must be a non-negative number",
                ));
            }
        }
        Ok(())
    }
}

/// Wait-time feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSection {
    /// Feed URL returning JSON keyed by city
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with feed requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FeedSection {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    concat!("waitroom/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Ranking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingSection {
    /// Number of facilities in the summary
    #[serde(default = "default_top_count")]
    pub top_count: usize,

    /// Radius applied when a query does not give one
    #[serde(default)]
    pub default_max_distance_km: Option<f64>,
}

impl Default for RankingSection {
    fn default() -> Self {
        Self {
            top_count: default_top_count(),
            default_max_distance_km: None,
        }
    }
}

fn default_top_count() -> usize {
    3
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySection {
    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

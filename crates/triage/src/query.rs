//! The wait-room query service
//!
//! [`WaitRoomQueryService`] runs one query end to end: resolve the user's
//! location, fetch the feed, pick the city, enrich, rank and summarize. It is
//! all-or-nothing. Either every step succeeds, or the caller gets a failure
//! with a generic message while the details go to the log.

use crate::error::Result;
use crate::facility::{EnrichedFacility, enrich_all, select_city};
use crate::location::LocationSource;
use crate::ranking::{DEFAULT_TOP_COUNT, filter_and_rank, select_top, usable_radius};
use crate::summary::{FAILURE_MESSAGE, Summary, status_message};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info, instrument};
use waitroom_core::config::RankingSection;
use waitroom_feed::WaitTimeFeed;
use waitroom_geo::Location;
use waitroom_telemetry::{Timer, metrics, session_id};

/// How urgent the patient reports their situation to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    /// Could wait for a clinic appointment
    Low,
    /// Should be seen today
    Medium,
    /// Needs prompt emergency care
    High,
    /// Life-threatening
    Emergency,
}

impl UrgencyLevel {
    /// Lowercase name as used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Emergency => "emergency",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an urgency level name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown urgency level '{0}' (expected low, medium, high or emergency)")]
pub struct ParseUrgencyError(String);

impl FromStr for UrgencyLevel {
    type Err = ParseUrgencyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "emergency" => Ok(Self::Emergency),
            _ => Err(ParseUrgencyError(s.to_string())),
        }
    }
}

/// Arguments of one query, as an LLM tool call supplies them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitRoomQuery {
    /// City key in the feed, e.g. `"Edmonton"`
    pub user_city: String,
    /// Reported urgency, echoed back in the city info
    pub urgency_level: UrgencyLevel,
    /// Only keep facilities at most this far away. Zero, negative and
    /// non-finite values mean no radius, as a tool caller filling the optional
    /// argument with `0` expects.
    #[serde(rename = "maxDistance", default, skip_serializing_if = "Option::is_none")]
    pub max_distance_km: Option<f64>,
}

impl WaitRoomQuery {
    /// Create a query without a radius
    pub fn new(user_city: impl Into<String>, urgency_level: UrgencyLevel) -> Self {
        Self {
            user_city: user_city.into(),
            urgency_level,
            max_distance_km: None,
        }
    }

    /// Restrict results to `km` around the user
    #[must_use]
    pub fn with_max_distance(mut self, km: f64) -> Self {
        self.max_distance_km = Some(km);
        self
    }

    /// Read the arguments of a `getEmergencyWaitRoomInfo` tool call
    pub fn from_tool_args(args: &serde_json::Value) -> serde_json::Result<Self> {
        Self::deserialize(args)
    }
}

/// Every remaining facility in ranked order, for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    /// Facilities ordered by the two-tier ranking rule
    pub facilities: Vec<EnrichedFacility>,
    /// Where distances were measured from
    pub user_location: Location,
}

/// The query context echoed back to a tool caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInfo {
    /// City as requested
    pub city: String,
    /// Urgency as requested
    pub urgency_level: UrgencyLevel,
    /// Resolved user location
    pub user_location: Location,
}

/// Everything a successful query produces
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutput {
    /// Full ranked list
    pub full_result: RankedResult,
    /// Bounded digest of the best facilities
    pub summary: Summary,
    /// Query context
    pub city_info: CityInfo,
    /// Full records of the summarized facilities
    pub top_facilities: Vec<EnrichedFacility>,
    /// Status line naming the best facility
    pub message: String,
}

/// Outcome of [`WaitRoomQueryService::query`], shaped for UI and tool
/// responses.
///
/// On failure every payload field is `None` and `message` is generic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Whether the query completed
    pub success: bool,
    /// Status line for the user or the language model
    pub message: String,
    /// Full ranked list
    pub full_result: Option<RankedResult>,
    /// Bounded digest of the best facilities
    pub summary: Option<Summary>,
    /// Query context
    pub city_info: Option<CityInfo>,
    /// Full records of the summarized facilities
    pub top_facilities: Option<Vec<EnrichedFacility>>,
}

impl QueryResult {
    /// The generic failure result
    pub fn failure() -> Self {
        Self {
            success: false,
            message: FAILURE_MESSAGE.to_string(),
            full_result: None,
            summary: None,
            city_info: None,
            top_facilities: None,
        }
    }
}

impl From<QueryOutput> for QueryResult {
    fn from(output: QueryOutput) -> Self {
        Self {
            success: true,
            message: output.message,
            full_result: Some(output.full_result),
            summary: Some(output.summary),
            city_info: Some(output.city_info),
            top_facilities: Some(output.top_facilities),
        }
    }
}

/// Runs wait-room queries against a feed
#[derive(Debug, Clone)]
pub struct WaitRoomQueryService<F> {
    feed: F,
    top_count: usize,
    default_max_distance_km: Option<f64>,
}

impl<F: WaitTimeFeed> WaitRoomQueryService<F> {
    /// Create a service over `feed` with default ranking settings
    pub fn new(feed: F) -> Self {
        Self {
            feed,
            top_count: DEFAULT_TOP_COUNT,
            default_max_distance_km: None,
        }
    }

    /// Create a service using the ranking section of the configuration
    pub fn from_config(feed: F, ranking: &RankingSection) -> Self {
        Self::new(feed)
            .with_top_count(ranking.top_count)
            .with_default_max_distance(ranking.default_max_distance_km)
    }

    /// Set how many facilities the summary keeps
    #[must_use]
    pub fn with_top_count(mut self, count: usize) -> Self {
        self.top_count = count;
        self
    }

    /// Set the radius used when a query gives none
    #[must_use]
    pub fn with_default_max_distance(mut self, km: Option<f64>) -> Self {
        self.default_max_distance_km = km;
        self
    }

    /// The underlying feed
    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Run a query, reporting failure as a [`QueryResult`].
    ///
    /// Never fails; the error behind a failed result is logged with its code.
    pub async fn query(&self, request: &WaitRoomQuery, location: impl LocationSource) -> QueryResult {
        match self.try_query(request, location).await {
            Ok(output) => QueryResult::from(output),
            Err(_) => QueryResult::failure(),
        }
    }

    /// Run a query, returning the error on failure
    #[instrument(
        skip_all,
        fields(
            session = %session_id(),
            city = %request.user_city,
            urgency = %request.urgency_level
        )
    )]
    pub async fn try_query(
        &self,
        request: &WaitRoomQuery,
        location: impl LocationSource,
    ) -> Result<QueryOutput> {
        let timer = Timer::start("waitroom.query_ms");
        metrics().increment("waitroom.queries");

        let outcome = self.run(request, location).await;
        let elapsed_ms = timer.stop().as_millis();

        match &outcome {
            Ok(output) => debug!(
                elapsed_ms,
                total = output.summary.total_facilities,
                "Query finished"
            ),
            Err(e) => {
                metrics().increment("waitroom.queries.failed");
                error!(code = %e.code(), error = %e, elapsed_ms, "Wait room query failed");
            }
        }
        outcome
    }

    async fn run(&self, request: &WaitRoomQuery, location: impl LocationSource) -> Result<QueryOutput> {
        let user_location = location.resolve().await?;
        debug!(%user_location, "Resolved user location");

        let payload = self.feed.fetch().await?;
        let records = select_city(&payload, &request.user_city);

        let enrichment = enrich_all(records, &user_location);
        record_degraded("waitroom.records.coordinate_fallback", enrichment.coordinate_fallbacks);
        record_degraded("waitroom.records.unknown_wait", enrichment.unknown_waits);

        let max_distance_km =
            usable_radius(request.max_distance_km).or(usable_radius(self.default_max_distance_km));
        let facilities = filter_and_rank(enrichment.facilities, max_distance_km);
        let top_facilities = select_top(&facilities, self.top_count);

        let total = facilities.len();
        let summary = Summary::new(total, &top_facilities);
        let message = status_message(&request.user_city, total, top_facilities.first());

        info!(
            total,
            recommended = top_facilities.len(),
            max_distance_km,
            "Ranked facilities"
        );

        Ok(QueryOutput {
            full_result: RankedResult {
                facilities,
                user_location,
            },
            summary,
            city_info: CityInfo {
                city: request.user_city.clone(),
                urgency_level: request.urgency_level,
                user_location,
            },
            top_facilities,
            message,
        })
    }
}

fn record_degraded(name: &str, count: usize) {
    if count > 0 {
        metrics().increment_by(name, u64::try_from(count).unwrap_or(u64::MAX));
    }
}

//! Emergency facility ranking for triage assistants
//!
//! Given where a patient is and the live emergency-room wait-time feed, this
//! crate works out how far each facility is, reads the published waits,
//! filters by radius and ranks what remains. The result comes in two sizes: a
//! full ranked list for display and a short summary for an LLM tool response.
//!
//! - [`wait_time`]: free-text waits to minutes
//! - [`facility`]: feed records and enrichment
//! - [`ranking`]: radius filter, two-tier ordering, blended top-N
//! - [`summary`]: compact digest and status line
//! - [`query`]: the end-to-end [`WaitRoomQueryService`]
//! - [`tool`]: LLM function declaration
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use waitroom_feed::StaticFeed;
//! use waitroom_geo::Location;
//! use waitroom_triage::{UrgencyLevel, WaitRoomQuery, WaitRoomQueryService};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let feed = StaticFeed::new(json!({
//!     "Edmonton": {"Emergency": [{
//!         "Name": "Royal Alexandra Hospital",
//!         "WaitTime": "1 hr",
//!         "GoogleMapsLinkDirection": "https://www.google.com/maps/dir/?api=1&destination=53.5,-113.5"
//!     }]}
//! }));
//! let service = WaitRoomQueryService::new(feed);
//!
//! let request = WaitRoomQuery::new("Edmonton", UrgencyLevel::High);
//! let result = service.query(&request, Location::new(53.5, -113.4)).await;
//!
//! assert!(result.success);
//! assert_eq!(result.summary.unwrap().total_facilities, 1);
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod facility;
pub mod location;
pub mod query;
pub mod ranking;
pub mod summary;
pub mod tool;
pub mod wait_time;

pub use error::QueryError;
pub use facility::{EnrichedFacility, Enrichment, RawFacilityRecord, enrich, enrich_all, select_city};
pub use location::{LocationError, LocationSource};
pub use query::{
    CityInfo, ParseUrgencyError, QueryOutput, QueryResult, RankedResult, UrgencyLevel,
    WaitRoomQuery, WaitRoomQueryService,
};
pub use ranking::{
    DEFAULT_TOP_COUNT, DISTANCE_WEIGHT, WAIT_TIME_THRESHOLD_MINUTES, WAIT_TIME_WEIGHT,
    blended_score, compare_facilities, filter_and_rank, select_top, usable_radius,
};
pub use summary::{FAILURE_MESSAGE, RecommendedFacility, Summary};
pub use tool::{TOOL_NAME, tool_declaration};
pub use wait_time::{UNKNOWN_WAIT_MINUTES, parse_wait_time, try_parse_wait_time};

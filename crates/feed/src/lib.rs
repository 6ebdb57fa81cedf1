//! Client for the emergency-room wait-time feed
//!
//! The feed is an HTTP endpoint returning a JSON object keyed by city name.
//! Its shape is outside our control, so this crate hands the payload on as a
//! [`serde_json::Value`] once the root has been checked to be an object; the
//! per-record validation happens where records are enriched.
//!
//! # Example
//!
//! ```rust,no_run
//! use waitroom_feed::{FeedConfig, HttpFeed, WaitTimeFeed};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let feed = HttpFeed::with_config(FeedConfig::default())?;
//!     let payload = feed.fetch().await?;
//!     println!("{} cities", payload.as_object().map_or(0, |o| o.len()));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod source;

pub use client::HttpFeed;
pub use config::FeedConfig;
pub use error::{FeedError, FeedResult};
pub use source::{StaticFeed, WaitTimeFeed};

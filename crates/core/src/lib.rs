//! Core utilities shared by the waitroom crates
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults for every field
//!
//! # Example
//!
//! ```rust,no_run
//! use waitroom_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("feed: {}", config.schema.feed.url);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, ErrorReport, Result, ResultExt, exit_codes};

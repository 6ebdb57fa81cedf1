//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed configuration values
    pub schema: ConfigSchema,
    /// File the configuration was read from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist. Without one, the standard locations are
    /// searched and defaults apply when none exists.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };
        schema.validate()?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = ["waitroom.toml", ".waitroom.toml", ".config/waitroom.toml"];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content =
        std::fs::read_to_string(path).context(format!("Failed to read config file {path}"))?;

    toml::from_str(&content).context(format!("Failed to parse config file {path}"))
}

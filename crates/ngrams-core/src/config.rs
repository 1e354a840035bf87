//! Configuration for ngrams-core
//!
//! Connection settings for the two backing stores. Every section has a
//! default so a partial TOML file is enough.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default works index pattern, excluding the quarantined indices
pub const DEFAULT_WORKS_INDEX: &str = "works-v13-*,-*invalid-data";

/// System-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NgramsConfig {
    /// Search index connection
    pub search: SearchConfig,
    /// N-gram store location
    pub store: StoreConfig,
}

impl NgramsConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&text)?)
    }
}

/// Search index configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the Elasticsearch cluster
    pub url: String,
    /// Index pattern holding works
    pub works_index: String,
    /// Hard timeout for each query in seconds
    pub timeout_secs: u64,
    /// User agent sent with each query
    pub user_agent: String,
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            works_index: DEFAULT_WORKS_INDEX.to_string(),
            timeout_secs: 30,
            user_agent: concat!("ngrams-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// N-gram store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database holding the `ngrams` table
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("ngrams.db"),
        }
    }
}

//! Command-line and environment configuration
//!
//! Values given on the command line or through the environment override the
//! optional TOML file, which in turn overrides the built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use ngrams_core::NgramsConfig;

/// N-grams server - serves precomputed n-grams for scholarly works
#[derive(Parser, Debug, Clone)]
#[command(name = "ngrams-server")]
#[command(about = "HTTP server for the works n-grams API")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "NGRAMS_ADDR", default_value = "127.0.0.1:8080")]
    pub listen: String,

    /// TOML configuration file
    #[arg(long, env = "NGRAMS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Elasticsearch base URL
    #[arg(long, env = "ES_URL_PROD")]
    pub es_url: Option<String>,

    /// Works index pattern
    #[arg(long, env = "WORKS_INDEX")]
    pub works_index: Option<String>,

    /// Search query timeout in seconds
    #[arg(long, env = "ES_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// SQLite database holding the ngrams table
    #[arg(long, env = "DATABASE_PATH")]
    pub database_path: Option<PathBuf>,
}

impl Args {
    /// Build the core configuration from file, environment and flags
    pub fn resolve_config(&self) -> Result<NgramsConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => NgramsConfig::from_file(path)?,
            None => NgramsConfig::default(),
        };

        if let Some(url) = &self.es_url {
            config.search.url = url.clone();
        }
        if let Some(index) = &self.works_index {
            config.search.works_index = index.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.search.timeout_secs = secs;
        }
        if let Some(path) = &self.database_path {
            config.store.database_path = path.clone();
        }

        Ok(config)
    }
}

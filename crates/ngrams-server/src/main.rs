//! N-grams Server Binary
//!
//! Standalone server for the works n-grams API.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ngrams_core::NgramService;
use ngrams_server::{config::Args, serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ngrams_server=debug,ngrams_core=debug")),
        )
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;
    tracing::info!(
        es_url = %config.search.url,
        works_index = %config.search.works_index,
        database = %config.store.database_path.display(),
        "starting n-grams server"
    );

    let service = NgramService::from_config(&config)?;
    let state = Arc::new(AppState::new(service));

    serve(&args.listen, state).await
}

//! N-grams Server - Works N-grams API
//!
//! HTTP delivery for `ngrams-core`: routing, status mapping and startup.

pub mod config;
pub mod http;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use ngrams_core::NgramService;

/// Shared application state
pub struct AppState {
    pub service: NgramService,
}

impl AppState {
    pub fn new(service: NgramService) -> Self {
        Self { service }
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::get_status))
        // The identifier may contain slashes, so capture the rest of the path
        .route("/works/{*path}", get(http::get_work_ngrams))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("N-grams server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use ngrams_core::{IdentifierKind, NgramError, ResponseDocument};

use crate::AppState;

/// Failure of a request, mapped to a status code at the edge
#[derive(Debug)]
pub enum ApiError {
    /// Path under `/works/` that is not an n-grams route
    NoRoute,
    /// Failure from the n-gram pipeline
    Ngram(NgramError),
}

impl From<NgramError> for ApiError {
    fn from(e: NgramError) -> Self {
        ApiError::Ngram(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NoRoute => StatusCode::NOT_FOUND.into_response(),
            ApiError::Ngram(NgramError::InvalidFormat) => {
                (StatusCode::NOT_FOUND, NgramError::InvalidFormat.to_string()).into_response()
            }
            ApiError::Ngram(NgramError::NotFound(IdentifierKind::Work)) => {
                StatusCode::NOT_FOUND.into_response()
            }
            ApiError::Ngram(NgramError::NotFound(IdentifierKind::Doi)) => {
                (StatusCode::NOT_FOUND, "DOI not found.").into_response()
            }
            ApiError::Ngram(e) => {
                tracing::error!("Backing store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Backing store unavailable.",
                )
                    .into_response()
            }
        }
    }
}

/// Get the n-grams of a work, by work identifier or DOI
///
/// `path` is everything after `/works/`, e.g. `10.7717/peerj.4375/ngrams`.
pub async fn get_work_ngrams(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Json<ResponseDocument>, ApiError> {
    let raw = path.strip_suffix("/ngrams").ok_or(ApiError::NoRoute)?;

    match state.service.handle(raw).await {
        Ok(doc) => Ok(Json(doc)),
        Err(e) => {
            if !e.is_unavailable() {
                tracing::warn!(identifier = raw, "{}", e);
            }
            Err(e.into())
        }
    }
}

/// Get service status
pub async fn get_status() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "msg": "Works n-grams API"
    }))
}

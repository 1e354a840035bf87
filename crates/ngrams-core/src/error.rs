//! Error types for ngrams-core

use std::fmt;

use thiserror::Error;

/// Result type alias for n-gram operations
pub type Result<T> = std::result::Result<T, NgramError>;

/// Which identifier form failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Canonical work identifier (`W...`)
    Work,
    /// Digital Object Identifier
    Doi,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierKind::Work => write!(f, "work identifier"),
            IdentifierKind::Doi => write!(f, "DOI"),
        }
    }
}

/// Main error type for a single n-gram request
#[derive(Error, Debug)]
pub enum NgramError {
    /// Input is neither a work identifier nor a DOI
    #[error("Invalid ID format. Needs to be a canonical work identifier or DOI.")]
    InvalidFormat,

    /// Well-formed identifier that is absent from the search index
    #[error("{0} not found")]
    NotFound(IdentifierKind),

    /// Search index could not be queried
    #[error("Search index error: {0}")]
    Index(#[from] IndexError),

    /// N-gram store could not be read
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl NgramError {
    /// True when the failure comes from a backing store rather than the input
    pub fn is_unavailable(&self) -> bool {
        matches!(self, NgramError::Index(_) | NgramError::Store(_))
    }
}

/// Search index errors
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },

    #[error("Timeout")]
    Timeout,

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl From<reqwest::Error> for IndexError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            IndexError::Timeout
        } else {
            IndexError::RequestFailed {
                message: e.to_string(),
            }
        }
    }
}

/// N-gram store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid n-gram payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

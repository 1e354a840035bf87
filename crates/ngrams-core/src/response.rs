//! Response document assembly
//!
//! Field order of every struct here is the wire order: `meta` before
//! `ngrams`, and `count, doi, openalex_id` inside `meta`.

use serde::{Deserialize, Serialize};

use crate::resolver::ResolvedIdentity;

/// A single n-gram with its statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgramEntry {
    pub ngram: String,
    pub ngram_tokens: i64,
    pub ngram_count: i64,
    pub term_frequency: f64,
}

/// Response metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Always equal to the number of n-grams
    pub count: usize,
    pub doi: Option<String>,
    pub openalex_id: Option<String>,
}

/// Body returned for `/works/{id}/ngrams`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDocument {
    pub meta: Meta,
    pub ngrams: Vec<NgramEntry>,
}

impl ResponseDocument {
    /// Render the document as compact JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Combine a resolution outcome and lookup outcome into a response
pub fn assemble(identity: Option<&ResolvedIdentity>, ngrams: Vec<NgramEntry>) -> ResponseDocument {
    ResponseDocument {
        meta: Meta {
            count: ngrams.len(),
            doi: identity.map(|i| i.doi.clone()),
            openalex_id: identity.map(|i| i.work_id.clone()),
        },
        ngrams,
    }
}

//! Identifier classification
//!
//! Decides whether a raw path token names a work or a DOI.

use lazy_static::lazy_static;
use regex::Regex;

/// Namespace prefix of canonical work identifiers
pub const WORK_URL_PREFIX: &str = "https://openalex.org/";

/// Resolver prefix of fully qualified DOIs
pub const DOI_URL_PREFIX: &str = "https://doi.org/";

lazy_static! {
    // Work ids: W followed by at least two digits
    static ref WORK_ID_PATTERN: Regex = Regex::new(r"^[wW]\d{2,}").unwrap();
}

/// Shape of a raw identifier token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedId {
    /// Canonical work identifier, as supplied
    Work(String),
    /// DOI, bare or resolver-prefixed, as supplied
    Doi(String),
    /// Neither shape
    Invalid,
}

/// Classify a raw identifier token
pub fn classify(raw: &str) -> ClassifiedId {
    if WORK_ID_PATTERN.is_match(raw) {
        ClassifiedId::Work(raw.to_string())
    } else if raw.starts_with("https://doi.org") || raw.starts_with("10.") {
        ClassifiedId::Doi(raw.to_string())
    } else {
        ClassifiedId::Invalid
    }
}

/// Fully qualify a work identifier
pub fn qualify_work_id(raw: &str) -> String {
    format!("{}{}", WORK_URL_PREFIX, raw)
}

/// Fully qualify a DOI
///
/// Bare DOIs are lowercased; already qualified ones keep their case.
pub fn qualify_doi(raw: &str) -> String {
    if raw.starts_with("https://doi.org") {
        raw.to_string()
    } else {
        format!("{}{}", DOI_URL_PREFIX, raw.to_lowercase())
    }
}

/// Storage key for a DOI: the DOI without its resolver prefix
pub fn storage_key(doi: &str) -> &str {
    doi.strip_prefix(DOI_URL_PREFIX).unwrap_or(doi)
}

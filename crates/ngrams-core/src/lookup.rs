//! N-gram lookup by resolved DOI

use std::sync::Arc;

use crate::error::Result;
use crate::identifiers::storage_key;
use crate::response::NgramEntry;
use crate::store::NgramStore;

#[derive(Clone)]
pub struct NgramLookup {
    store: Arc<dyn NgramStore>,
}

impl NgramLookup {
    pub fn new(store: Arc<dyn NgramStore>) -> Self {
        Self { store }
    }

    /// Stored n-grams for a DOI, empty when nothing has been computed yet
    pub async fn lookup(&self, doi: &str) -> Result<Vec<NgramEntry>> {
        let key = storage_key(doi);
        let ngrams = self
            .store
            .get(key)
            .await?
            .and_then(|record| record.ngrams)
            .unwrap_or_default();

        if ngrams.is_empty() {
            tracing::debug!(key, "no n-grams stored");
        }
        Ok(ngrams)
    }
}

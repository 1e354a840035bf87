//! Request pipeline: classify, resolve, look up, assemble

use std::sync::Arc;

use crate::config::NgramsConfig;
use crate::error::Result;
use crate::identifiers::classify;
use crate::index::{ElasticsearchIndex, SearchIndex};
use crate::lookup::NgramLookup;
use crate::resolver::IdentifierResolver;
use crate::response::{assemble, ResponseDocument};
use crate::store::{NgramStore, SqliteNgramStore};

/// Serves n-gram documents for raw identifiers
///
/// Holds no per-request state; share it behind an `Arc`.
#[derive(Clone)]
pub struct NgramService {
    resolver: IdentifierResolver,
    lookup: NgramLookup,
}

impl NgramService {
    pub fn new(index: Arc<dyn SearchIndex>, store: Arc<dyn NgramStore>) -> Self {
        Self {
            resolver: IdentifierResolver::new(index),
            lookup: NgramLookup::new(store),
        }
    }

    /// Connect to Elasticsearch and open the SQLite store
    pub fn from_config(config: &NgramsConfig) -> Result<Self> {
        let index = ElasticsearchIndex::new(&config.search)?;
        let store = SqliteNgramStore::open(&config.store.database_path)?;
        Ok(Self::new(Arc::new(index), Arc::new(store)))
    }

    /// Run the whole pipeline for one raw identifier
    pub async fn handle(&self, raw: &str) -> Result<ResponseDocument> {
        let classified = classify(raw);
        let identity = self.resolver.resolve(&classified).await?;
        let ngrams = self.lookup.lookup(&identity.doi).await?;
        Ok(assemble(Some(&identity), ngrams))
    }
}

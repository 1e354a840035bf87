//! N-grams Core
//!
//! Resolves a scholarly work from either a canonical work identifier or a DOI,
//! fetches its precomputed n-grams and assembles the response document.
//!
//! The pipeline is leaf-first:
//! - [`identifiers`] classifies the raw path token
//! - [`resolver`] maps it to the (work id, DOI) pair via a [`SearchIndex`]
//! - [`lookup`] reads the n-gram list from an [`NgramStore`]
//! - [`response`] builds the order-stable [`ResponseDocument`]
//!
//! [`NgramService`] wires these together for a single request.

pub mod config;
pub mod error;
pub mod identifiers;
pub mod index;
pub mod lookup;
pub mod resolver;
pub mod response;
pub mod service;
pub mod store;

pub use async_trait::async_trait;
pub use config::{NgramsConfig, SearchConfig, StoreConfig};
pub use error::{IdentifierKind, IndexError, NgramError, Result, StoreError};
pub use identifiers::{classify, ClassifiedId, DOI_URL_PREFIX, WORK_URL_PREFIX};
pub use index::{
    ElasticsearchIndex, InMemorySearchIndex, IndexHit, IndexResponse, SearchField, SearchIndex,
};
pub use lookup::NgramLookup;
pub use resolver::{IdentifierResolver, ResolvedIdentity};
pub use response::{assemble, Meta, NgramEntry, ResponseDocument};
pub use service::NgramService;
pub use store::{InMemoryNgramStore, NgramRecord, NgramStore, SqliteNgramStore};

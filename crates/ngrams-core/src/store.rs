//! N-gram store collaborator
//!
//! Precomputed n-gram lists keyed by bare DOI. The HTTP surface only reads;
//! `put` exists for loading and tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::response::NgramEntry;

/// One row of the `ngrams` table
#[derive(Debug, Clone, PartialEq)]
pub struct NgramRecord {
    /// Bare DOI, the primary key
    pub doi: String,
    /// Stored payload, `None` when the column is null
    pub ngrams: Option<Vec<NgramEntry>>,
}

/// Get-by-key capability of the n-gram store
#[async_trait]
pub trait NgramStore: Send + Sync {
    async fn get(&self, doi: &str) -> Result<Option<NgramRecord>, StoreError>;
}

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS ngrams (
    doi TEXT PRIMARY KEY,
    json_ngrams TEXT
);
"#;

/// SQLite-backed n-gram store
pub struct SqliteNgramStore {
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteNgramStore {
    /// Open (or create) the store at the given database path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open(path)?;
        Self::initialize(conn)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    fn initialize(conn: rusqlite::Connection) -> Result<Self, StoreError> {
        conn.execute_batch(CREATE_TABLES)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert or replace the n-grams for a DOI
    pub fn put(&self, doi: &str, ngrams: Option<&[NgramEntry]>) -> Result<(), StoreError> {
        let json = ngrams.map(serde_json::to_string).transpose()?;
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;

        conn.execute(
            "INSERT OR REPLACE INTO ngrams (doi, json_ngrams) VALUES (?1, ?2)",
            rusqlite::params![doi, json],
        )?;

        Ok(())
    }

    fn get_sync(&self, doi: &str) -> Result<Option<NgramRecord>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;

        let result = conn.query_row(
            "SELECT doi, json_ngrams FROM ngrams WHERE doi = ?1",
            [doi],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?)),
        );

        let (doi, json) = match result {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let ngrams = json
            .as_deref()
            .map(|json| serde_json::from_str::<Vec<NgramEntry>>(json))
            .transpose()?;

        Ok(Some(NgramRecord { doi, ngrams }))
    }
}

#[async_trait]
impl NgramStore for SqliteNgramStore {
    async fn get(&self, doi: &str) -> Result<Option<NgramRecord>, StoreError> {
        self.get_sync(doi)
    }
}

/// N-gram store held in memory, for tests and local runs
#[derive(Debug, Default)]
pub struct InMemoryNgramStore {
    records: HashMap<String, Option<Vec<NgramEntry>>>,
}

impl InMemoryNgramStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, doi: impl Into<String>, ngrams: Option<Vec<NgramEntry>>) -> Self {
        self.records.insert(doi.into(), ngrams);
        self
    }
}

#[async_trait]
impl NgramStore for InMemoryNgramStore {
    async fn get(&self, doi: &str) -> Result<Option<NgramRecord>, StoreError> {
        Ok(self.records.get(doi).map(|ngrams| NgramRecord {
            doi: doi.to_string(),
            ngrams: ngrams.clone(),
        }))
    }
}

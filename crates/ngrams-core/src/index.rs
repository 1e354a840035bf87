//! Search index collaborator
//!
//! The works index maps canonical work identifiers to DOIs. Only exact-match
//! lookups on a single field are needed, capped to one hit and restricted to
//! the `id` and `doi` fields.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::IndexError;

/// Indexed field an exact-match query runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Id,
    Doi,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Id => "id",
            SearchField::Doi => "doi",
        }
    }
}

/// Projection of a works document onto `id` and `doi`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexHit {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
}

/// Result of an exact-match query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexResponse {
    /// Total matching documents reported by the index
    pub total: u64,
    /// Returned documents, at most one
    pub hits: Vec<IndexHit>,
}

impl IndexResponse {
    /// First hit in the index's own ordering, if anything matched
    pub fn first(self) -> Option<IndexHit> {
        if self.total == 0 {
            return None;
        }
        self.hits.into_iter().next()
    }
}

/// Exact-match query capability of the works index
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Find the document whose `field` equals `value` exactly
    async fn find_exact(&self, field: SearchField, value: &str)
        -> Result<IndexResponse, IndexError>;
}

// ===== Elasticsearch =====

#[derive(Debug, Deserialize)]
struct EsSearchResponse {
    hits: EsHits,
}

#[derive(Debug, Deserialize)]
struct EsHits {
    total: EsTotal,
    #[serde(default)]
    hits: Vec<EsHit>,
}

/// `hits.total` is an object since ES 7 and a bare number before
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EsTotal {
    Object { value: u64 },
    Count(u64),
}

impl EsTotal {
    fn value(&self) -> u64 {
        match self {
            EsTotal::Object { value } => *value,
            EsTotal::Count(count) => *count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EsHit {
    #[serde(rename = "_source", default)]
    source: IndexHit,
}

/// Elasticsearch-backed works index
pub struct ElasticsearchIndex {
    client: Client,
    base_url: String,
    works_index: String,
    user_agent: String,
}

impl ElasticsearchIndex {
    pub fn new(config: &SearchConfig) -> Result<Self, IndexError> {
        Self::with_timeout(config, config.timeout())
    }

    pub fn with_timeout(config: &SearchConfig, timeout: Duration) -> Result<Self, IndexError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            works_index: config.works_index.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Endpoint for `_search` against the works index
    pub fn search_url(&self) -> String {
        format!("{}/{}/_search", self.base_url, self.works_index)
    }

    /// Query body for an exact-match lookup
    pub fn query_body(field: SearchField, value: &str) -> serde_json::Value {
        serde_json::json!({
            "size": 1,
            "track_total_hits": true,
            "_source": ["id", "doi"],
            "query": {
                "bool": {
                    "filter": [
                        { "term": { field.as_str(): value } }
                    ]
                }
            }
        })
    }

    /// Parse an Elasticsearch `_search` response body
    pub fn parse_search_response(json: &str) -> Result<IndexResponse, IndexError> {
        let response: EsSearchResponse =
            serde_json::from_str(json).map_err(|e| IndexError::Parse {
                message: format!("Invalid search response: {}", e),
            })?;

        Ok(IndexResponse {
            total: response.hits.total.value(),
            hits: response
                .hits
                .hits
                .into_iter()
                .map(|hit| hit.source)
                .collect(),
        })
    }
}

#[async_trait]
impl SearchIndex for ElasticsearchIndex {
    async fn find_exact(
        &self,
        field: SearchField,
        value: &str,
    ) -> Result<IndexResponse, IndexError> {
        tracing::debug!(field = field.as_str(), value, "querying works index");

        let response = self
            .client
            .post(self.search_url())
            .header("User-Agent", &self.user_agent)
            .json(&Self::query_body(field, value))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(IndexError::Status { status, body });
        }

        Self::parse_search_response(&body)
    }
}

// ===== In-memory =====

/// Works index held in memory, for tests and local runs
#[derive(Debug, Default)]
pub struct InMemorySearchIndex {
    documents: Vec<IndexHit>,
    queries: AtomicUsize,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a work document
    pub fn with_work(mut self, id: impl Into<String>, doi: Option<&str>) -> Self {
        self.documents.push(IndexHit {
            id: Some(id.into()),
            doi: doi.map(str::to_string),
        });
        self
    }

    /// Number of queries served so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn find_exact(
        &self,
        field: SearchField,
        value: &str,
    ) -> Result<IndexResponse, IndexError> {
        self.queries.fetch_add(1, Ordering::Relaxed);

        let matches: Vec<&IndexHit> = self
            .documents
            .iter()
            .filter(|doc| {
                let candidate = match field {
                    SearchField::Id => doc.id.as_deref(),
                    SearchField::Doi => doc.doi.as_deref(),
                };
                candidate == Some(value)
            })
            .collect();

        Ok(IndexResponse {
            total: matches.len() as u64,
            hits: matches.into_iter().take(1).cloned().collect(),
        })
    }
}

//! Bidirectional identifier resolution
//!
//! Maps a work identifier to its DOI, or a DOI to its work identifier, with a
//! single exact-match query against the works index.

use std::sync::Arc;

use crate::error::{IdentifierKind, NgramError, Result};
use crate::identifiers::{qualify_doi, qualify_work_id, ClassifiedId};
use crate::index::{SearchField, SearchIndex};

/// Both identifiers of a work, fully qualified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// `https://openalex.org/W...`
    pub work_id: String,
    /// `https://doi.org/10....`
    pub doi: String,
}

/// Resolves classified identifiers against the works index
#[derive(Clone)]
pub struct IdentifierResolver {
    index: Arc<dyn SearchIndex>,
}

impl IdentifierResolver {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        Self { index }
    }

    /// Resolve to the canonical (work id, DOI) pair
    ///
    /// Invalid identifiers fail without touching the index.
    pub async fn resolve(&self, classified: &ClassifiedId) -> Result<ResolvedIdentity> {
        match classified {
            ClassifiedId::Work(raw) => self.resolve_work(raw).await,
            ClassifiedId::Doi(raw) => self.resolve_doi(raw).await,
            ClassifiedId::Invalid => Err(NgramError::InvalidFormat),
        }
    }

    async fn resolve_work(&self, raw: &str) -> Result<ResolvedIdentity> {
        let work_id = qualify_work_id(raw);
        let hit = self
            .index
            .find_exact(SearchField::Id, &work_id)
            .await?
            .first();

        // A work without a DOI has no n-gram key
        let doi = hit
            .and_then(|hit| hit.doi)
            .ok_or(NgramError::NotFound(IdentifierKind::Work))?;

        tracing::debug!(%work_id, %doi, "resolved work identifier");
        Ok(ResolvedIdentity { work_id, doi })
    }

    async fn resolve_doi(&self, raw: &str) -> Result<ResolvedIdentity> {
        let doi = qualify_doi(raw);
        let hit = self
            .index
            .find_exact(SearchField::Doi, &doi)
            .await?
            .first();

        let work_id = hit
            .and_then(|hit| hit.id)
            .ok_or(NgramError::NotFound(IdentifierKind::Doi))?;

        tracing::debug!(%doi, %work_id, "resolved DOI");
        Ok(ResolvedIdentity { work_id, doi })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::classify;
    use crate::index::InMemorySearchIndex;

    fn index() -> Arc<InMemorySearchIndex> {
        Arc::new(
            InMemorySearchIndex::new()
                .with_work(
                    "https://openalex.org/W2741809807",
                    Some("https://doi.org/10.7717/peerj.4375"),
                )
                .with_work("https://openalex.org/W99", None),
        )
    }

    #[tokio::test]
    async fn test_resolve_work_id() {
        let resolver = IdentifierResolver::new(index());
        let identity = resolver.resolve(&classify("W2741809807")).await.unwrap();

        assert_eq!(identity.work_id, "https://openalex.org/W2741809807");
        assert_eq!(identity.doi, "https://doi.org/10.7717/peerj.4375");
    }

    #[tokio::test]
    async fn test_resolve_bare_doi_is_lowercased() {
        let resolver = IdentifierResolver::new(index());
        let identity = resolver
            .resolve(&classify("10.7717/PEERJ.4375"))
            .await
            .unwrap();

        assert_eq!(identity.doi, "https://doi.org/10.7717/peerj.4375");
        assert_eq!(identity.work_id, "https://openalex.org/W2741809807");
    }

    #[tokio::test]
    async fn test_qualified_doi_keeps_case() {
        let resolver = IdentifierResolver::new(index());
        let result = resolver
            .resolve(&classify("https://doi.org/10.7717/PEERJ.4375"))
            .await;

        assert!(matches!(
            result,
            Err(NgramError::NotFound(IdentifierKind::Doi))
        ));
    }

    #[tokio::test]
    async fn test_round_trip() {
        let resolver = IdentifierResolver::new(index());
        let forward = resolver.resolve(&classify("W2741809807")).await.unwrap();
        let back = resolver.resolve(&classify(&forward.doi)).await.unwrap();

        assert_eq!(back, forward);
    }

    #[tokio::test]
    async fn test_unknown_work() {
        let resolver = IdentifierResolver::new(index());
        let result = resolver.resolve(&classify("W123")).await;
        assert!(matches!(
            result,
            Err(NgramError::NotFound(IdentifierKind::Work))
        ));
    }

    #[tokio::test]
    async fn test_work_without_doi_is_not_found() {
        let resolver = IdentifierResolver::new(index());
        let result = resolver.resolve(&classify("W99")).await;
        assert!(matches!(
            result,
            Err(NgramError::NotFound(IdentifierKind::Work))
        ));
    }

    #[tokio::test]
    async fn test_invalid_never_queries() {
        let index = index();
        let resolver = IdentifierResolver::new(index.clone());
        let result = resolver.resolve(&classify("not-an-id-or-doi")).await;

        assert!(matches!(result, Err(NgramError::InvalidFormat)));
        assert_eq!(index.query_count(), 0);
    }
}

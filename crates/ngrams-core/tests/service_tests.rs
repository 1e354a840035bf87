//! End-to-end pipeline tests against in-memory and SQLite collaborators

use std::sync::Arc;

use ngrams_core::{
    classify, ClassifiedId, IdentifierKind, InMemoryNgramStore, InMemorySearchIndex, NgramEntry,
    NgramError, NgramService, SqliteNgramStore,
};
use rstest::rstest;

const WORK_ID: &str = "https://openalex.org/W2741809807";
const DOI: &str = "https://doi.org/10.7717/peerj.4375";

fn entries(n: i64) -> Vec<NgramEntry> {
    (0..n)
        .map(|i| NgramEntry {
            ngram: format!("ngram {}", i),
            ngram_tokens: 2,
            ngram_count: n - i,
            term_frequency: (n - i) as f64 / 100.0,
        })
        .collect()
}

fn index() -> Arc<InMemorySearchIndex> {
    Arc::new(
        InMemorySearchIndex::new()
            .with_work(WORK_ID, Some(DOI))
            .with_work("https://openalex.org/W2000000001", Some("https://doi.org/10.1/empty")),
    )
}

fn service() -> NgramService {
    let store = InMemoryNgramStore::new()
        .with_record("10.7717/peerj.4375", Some(entries(42)))
        .with_record("10.1/empty", Some(Vec::new()));
    NgramService::new(index(), Arc::new(store))
}

// === Classification ===

#[rstest]
#[case("W2741809807")]
#[case("w2741809807")]
#[case("W10")]
#[case("W12-suffix")]
fn test_work_id_forms(#[case] raw: &str) {
    assert!(matches!(classify(raw), ClassifiedId::Work(_)));
}

#[rstest]
#[case("10.7717/peerj.4375")]
#[case("https://doi.org/10.7717/peerj.4375")]
#[case("10.1000/(SICI)1097-4679(199911)55:11")]
fn test_doi_forms(#[case] raw: &str) {
    assert!(matches!(classify(raw), ClassifiedId::Doi(_)));
}

#[rstest]
#[case("")]
#[case("W1")]
#[case("not-an-id-or-doi")]
#[case("https://openalex.org/W2741809807")]
#[case("11.1234/abc")]
fn test_invalid_forms(#[case] raw: &str) {
    assert_eq!(classify(raw), ClassifiedId::Invalid);
}

// === Pipeline ===

#[tokio::test]
async fn test_work_id_with_ngrams() {
    let doc = service().handle("W2741809807").await.unwrap();

    assert_eq!(doc.meta.count, 42);
    assert_eq!(doc.ngrams.len(), 42);
    assert_eq!(doc.meta.doi.as_deref(), Some(DOI));
    assert_eq!(doc.meta.openalex_id.as_deref(), Some(WORK_ID));
    assert_eq!(doc.ngrams, entries(42));
}

#[rstest]
#[case("10.7717/peerj.4375")]
#[case("10.7717/PeerJ.4375")]
#[case("https://doi.org/10.7717/peerj.4375")]
#[tokio::test]
async fn test_doi_inputs_resolve_to_same_document(#[case] raw: &str) {
    let doc = service().handle(raw).await.unwrap();

    assert_eq!(doc.meta.count, 42);
    assert_eq!(doc.meta.doi.as_deref(), Some(DOI));
    assert_eq!(doc.meta.openalex_id.as_deref(), Some(WORK_ID));
}

#[tokio::test]
async fn test_resolved_without_ngrams() {
    let index = Arc::new(InMemorySearchIndex::new().with_work(WORK_ID, Some(DOI)));
    let service = NgramService::new(index, Arc::new(InMemoryNgramStore::new()));

    let doc = service.handle("W2741809807").await.unwrap();
    assert_eq!(
        doc.to_json().unwrap(),
        r#"{"meta":{"count":0,"doi":"https://doi.org/10.7717/peerj.4375","openalex_id":"https://openalex.org/W2741809807"},"ngrams":[]}"#
    );
}

#[tokio::test]
async fn test_empty_payload_is_valid() {
    let doc = service().handle("W2000000001").await.unwrap();
    assert_eq!(doc.meta.count, 0);
    assert!(doc.ngrams.is_empty());
}

#[tokio::test]
async fn test_unknown_doi() {
    let result = service().handle("10.1080/00039896.1983.10543998").await;
    assert!(matches!(
        result,
        Err(NgramError::NotFound(IdentifierKind::Doi))
    ));
}

#[tokio::test]
async fn test_unknown_work_id() {
    let result = service().handle("W1234567").await;
    assert!(matches!(
        result,
        Err(NgramError::NotFound(IdentifierKind::Work))
    ));
}

#[tokio::test]
async fn test_invalid_identifier() {
    let result = service().handle("not-an-id-or-doi").await;
    let err = result.unwrap_err();

    assert!(matches!(err, NgramError::InvalidFormat));
    assert_eq!(
        err.to_string(),
        "Invalid ID format. Needs to be a canonical work identifier or DOI."
    );
}

#[tokio::test]
async fn test_repeated_requests_are_byte_identical() {
    let service = service();
    let first = service.handle("W2741809807").await.unwrap().to_json().unwrap();
    let second = service.handle("W2741809807").await.unwrap().to_json().unwrap();
    assert_eq!(first, second);
}

// === SQLite store ===

#[tokio::test]
async fn test_pipeline_over_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ngrams.db");

    {
        let store = SqliteNgramStore::open(&path).unwrap();
        store
            .put("10.7717/peerj.4375", Some(entries(3).as_slice()))
            .unwrap();
    }

    let store = SqliteNgramStore::open(&path).unwrap();
    let service = NgramService::new(index(), Arc::new(store));

    let doc = service.handle("https://doi.org/10.7717/peerj.4375").await.unwrap();
    assert_eq!(doc.meta.count, 3);
    assert_eq!(doc.ngrams[0].ngram, "ngram 0");
    assert_eq!(doc.ngrams[2].ngram_count, 1);
}

//! Readiness gate over a corpus on disk

use crate::common::{create_test_services, test_config, TestCorpus, HANDBOOK_BLOCK_COUNT};
use handbook_search::core::config::Config;
use handbook_search::core::indexer::StaticCorpusSource;
use handbook_search::core::services::Services;
use handbook_search::core::types::{Corpus, Document, Section};
use std::sync::Arc;

#[tokio::test]
async fn test_search_builds_on_first_use() {
    let corpus = TestCorpus::handbook();
    let services = create_test_services(corpus.path());
    assert!(!services.is_ready());

    let hits = services.search("apple").await.unwrap();
    assert!(services.is_ready());
    assert_eq!(hits[0].id, "orchard#apple-trees-title");
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let corpus = TestCorpus::handbook();
    let services = create_test_services(corpus.path());

    let first = services.initialize_index().await.unwrap();
    let second = services.initialize_index().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), HANDBOOK_BLOCK_COUNT);
}

#[tokio::test]
async fn test_concurrent_searches_share_one_index() {
    let corpus = TestCorpus::handbook();
    let services = create_test_services(corpus.path());

    let handles: Vec<_> = ["apple", "pests", "grafting", "tomatoes"]
        .into_iter()
        .map(|query| {
            let services = services.clone();
            tokio::spawn(async move { services.search(query).await })
        })
        .collect();

    for handle in handles {
        assert!(!handle.await.unwrap().unwrap().is_empty());
    }

    let a = services.initialize_index().await.unwrap();
    let b = services.clone().initialize_index().await.unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[tokio::test]
async fn test_missing_corpus_surfaces_not_found() {
    let services = Services::new(test_config(std::path::Path::new("/nonexistent/handbook"))).unwrap();

    let err = services.search("apple").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!services.is_ready());
}

#[tokio::test]
async fn test_static_source() {
    let corpus = Corpus::new(vec![Section::new(Document::new(
        "faq",
        "FAQ",
        "## Shipping\nWe ship apples worldwide.",
    ))]);
    let services = Services::with_source(
        Config::default(),
        Arc::new(StaticCorpusSource::new(corpus)),
    );

    let hits = services.search("ship").await.unwrap();
    let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["faq#shipping-title", "faq#shipping-content"]);
}

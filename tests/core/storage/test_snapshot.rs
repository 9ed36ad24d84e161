//! Export and hydration of a built index

use crate::common::{build_test_index, TestCorpus, HANDBOOK_BLOCK_COUNT};
use handbook_search::core::config::SearchConfig;
use handbook_search::core::error::SearchError;
use handbook_search::core::search::SearchIndex;
use handbook_search::core::storage::{IndexSnapshot, SNAPSHOT_FORMAT_VERSION};
use tempfile::TempDir;

const QUERIES: &[&str] = &[
    "apple",
    "the",
    "trees",
    "grafting",
    "rootstock",
    "orchard team",
    "Tomatoes (cherry)",
    "(",
    "zucchini",
    "",
];

#[test]
fn test_save_and_load_answers_identically() {
    let corpus = TestCorpus::handbook();
    let original = build_test_index(corpus.path());

    let out = TempDir::new().unwrap();
    let path = out.path().join("public").join("search-index.json");
    let snapshot = original.save(&path).unwrap();
    assert_eq!(snapshot.block_count, HANDBOOK_BLOCK_COUNT);

    let hydrated = SearchIndex::load(&path, &SearchConfig::default()).unwrap();
    assert_eq!(hydrated.len(), original.len());

    for query in QUERIES {
        assert_eq!(
            original.search(query).unwrap(),
            hydrated.search(query).unwrap(),
            "query {query:?}"
        );
    }
}

#[test]
fn test_snapshot_preserves_blocks() {
    let corpus = TestCorpus::handbook();
    let original = build_test_index(corpus.path());

    let snapshot = IndexSnapshot::from_json(&original.export_json().unwrap()).unwrap();
    assert_eq!(snapshot.format_version, SNAPSHOT_FORMAT_VERSION);
    assert_eq!(snapshot.blocks, original.blocks().unwrap());
}

#[test]
fn test_snapshot_json_shape() {
    let corpus = TestCorpus::handbook();
    let json = build_test_index(corpus.path()).export_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let first = &value["blocks"][0];
    assert_eq!(first["id"], "about#intro");
    assert_eq!(first["sectionTitle"], "About");
    assert_eq!(first["kind"], "intro");
    assert!(value["generatedAt"].is_string());
}

#[test]
fn test_export_empty_corpus_fails() {
    let corpus = TestCorpus::with_files(&[("notes/readme.txt", "not markdown")]);
    let index = build_test_index(corpus.path());

    let out = TempDir::new().unwrap();
    let result = index.save(&out.path().join("search-index.json"));
    match result {
        Err(e) => {
            assert!(e.is_fatal_export());
            assert!(matches!(e, SearchError::ExportFailed(_)));
        }
        Ok(_) => panic!("empty index must not export"),
    }
    assert!(!out.path().join("search-index.json").exists());
}

#[test]
fn test_load_corrupt_snapshot() {
    let out = TempDir::new().unwrap();
    let path = out.path().join("search-index.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(SearchIndex::load(&path, &SearchConfig::default()).is_err());
}

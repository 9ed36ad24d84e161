//! Query behavior over the handbook fixture

use crate::common::{assert_valid_stats, build_test_index, TestCorpus, HANDBOOK_BLOCK_COUNT};
use handbook_search::core::config::SearchConfig;
use handbook_search::core::search::SearchIndex;
use handbook_search::core::types::MatchField;
use std::collections::HashSet;

#[test]
fn test_build_stats() {
    let corpus = TestCorpus::handbook();
    let index = build_test_index(corpus.path());

    assert_valid_stats(index.stats());
    assert_eq!(index.len(), HANDBOOK_BLOCK_COUNT);
}

#[test]
fn test_title_hits_precede_content_hits() {
    let corpus = TestCorpus::handbook();
    let index = build_test_index(corpus.path());

    let hits = index.search("apple").unwrap();
    assert_eq!(hits[0].id, "orchard#apple-trees-title");
    assert_eq!(hits[0].snippet, "<mark>Apple</mark> Trees");
    assert_eq!(hits[0].all_snippets, vec![hits[0].snippet.clone()]);

    let content: HashSet<&str> = hits[1..].iter().map(|h| h.id.as_str()).collect();
    assert_eq!(
        content,
        HashSet::from([
            "orchard#apple-trees-content",
            "orchard/pruning#winter-pruning-content",
        ])
    );
    assert!(hits[1..].iter().all(|h| h.field == MatchField::Content));
}

#[test]
fn test_content_snippets_are_matching_paragraphs() {
    let corpus = TestCorpus::handbook();
    let index = build_test_index(corpus.path());

    let hits = index.search("apple").unwrap();
    let hit = hits
        .iter()
        .find(|h| h.id == "orchard#apple-trees-content")
        .unwrap();

    assert_eq!(
        hit.all_snippets,
        vec![
            "<mark>Apple</mark>s need full sun. See pruning.".to_string(),
            "Young <mark>apple</mark> trees need water.".to_string(),
        ]
    );
    assert_eq!(hit.snippet, hit.all_snippets.join("\n\n"));
}

#[test]
fn test_hit_ids_unique_and_keys_well_formed() {
    let corpus = TestCorpus::handbook();
    let index = build_test_index(corpus.path());

    for query in ["apple", "the", "a", "tree", "orchard"] {
        let hits = index.search(query).unwrap();
        let ids: HashSet<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids.len(), hits.len(), "duplicate hit for {query:?}");

        for hit in &hits {
            let expected = format!("{}-{}", hit.block_id, hit.field.suffix());
            assert_eq!(hit.id, expected);
            assert!(hit.snippet.contains("<mark>"), "unmarked snippet for {query:?}");
        }
    }
}

#[test]
fn test_metacharacters_are_literal() {
    let corpus = TestCorpus::handbook();
    let index = build_test_index(corpus.path());

    let hits = index.search("Tomatoes (cherry)").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(
        hits[0].snippet,
        "<mark>Tomatoes (cherry)</mark> need support."
    );

    for query in ["(", "[a-z]+", ".*", "\\d", "a|b", "^$"] {
        assert!(index.search(query).is_ok(), "query {query:?} failed");
    }
}

#[test]
fn test_drawer_blocks_are_searchable() {
    let corpus = TestCorpus::handbook();
    let index = build_test_index(corpus.path());

    let hits = index.search("grafting").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "orchard#graft-title");
    assert!(hits[0].doc.is_drawer);
}

#[test]
fn test_about_hits_use_about_label() {
    let corpus = TestCorpus::handbook();
    let index = build_test_index(corpus.path());

    let hits = index.search("orchard team").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].block_id, "about#contact");
    assert_eq!(hits[0].doc.section_title, "About");
}

#[test]
fn test_excluded_content_never_found() {
    let corpus = TestCorpus::handbook();
    let index = build_test_index(corpus.path());

    assert!(index.search("zucchini").unwrap().is_empty());
}

#[test]
fn test_markup_is_not_matched() {
    let corpus = TestCorpus::handbook();
    let index = build_test_index(corpus.path());

    // Link targets and emphasis markers are stripped before matching
    assert!(index.search("/orchard/pruning").unwrap().is_empty());
    assert_eq!(index.search("full sun").unwrap().len(), 1);
}

#[test]
fn test_empty_query() {
    let corpus = TestCorpus::handbook();
    let index = build_test_index(corpus.path());

    assert!(index.search("").unwrap().is_empty());
    assert!(index.search(" \t\n").unwrap().is_empty());
}

#[test]
fn test_results_are_deterministic() {
    let corpus = TestCorpus::handbook();
    let first = build_test_index(corpus.path());
    let second = build_test_index(corpus.path());

    for query in ["apple", "the", "trees", "rootstock"] {
        assert_eq!(
            first.search(query).unwrap(),
            second.search(query).unwrap(),
            "query {query:?}"
        );
    }
}

#[test]
fn test_independent_indexes_coexist() {
    let orchard = TestCorpus::handbook();
    let other = TestCorpus::with_files(&[("notes/notes.md", "## Apple\nA different apple.")]);

    let a = build_test_index(orchard.path());
    let b = build_test_index(other.path());

    assert_eq!(b.search("apple").unwrap()[0].block_id, "notes#apple");
    assert_eq!(a.search("apple").unwrap()[0].block_id, "orchard#apple-trees");
}

#[test]
fn test_custom_highlight_tag() {
    let corpus = TestCorpus::handbook();
    let blocks = build_test_index(corpus.path()).blocks().unwrap();

    let settings = SearchConfig {
        highlight_tag: "em".to_string(),
        ..SearchConfig::default()
    };
    let index = SearchIndex::from_blocks(&blocks, &settings).unwrap();

    let hits = index.search("pests").unwrap();
    assert_eq!(hits[0].snippet, "<em>Pests</em>");
}

//! Corpus loading and extraction over a handbook directory

use crate::common::{TestCorpus, HANDBOOK_BLOCK_COUNT, HANDBOOK_DOCUMENT_COUNT};
use handbook_search::core::config::Config;
use handbook_search::core::indexer::IndexingPipeline;
use handbook_search::core::types::BlockKind;

fn pipeline() -> IndexingPipeline {
    IndexingPipeline::new(
        vec!["**/drawer".to_string(), "**/drawer/**".to_string()],
        10,
    )
    .unwrap()
}

#[test]
fn test_handbook_sections_are_ordered() {
    let corpus = TestCorpus::handbook();
    let loaded = pipeline().load_corpus(corpus.path()).unwrap();

    let ids: Vec<&str> = loaded
        .corpus
        .sections
        .iter()
        .map(|s| s.document.id.as_str())
        .collect();
    assert_eq!(ids, vec!["about", "orchard", "garden"]);
    assert_eq!(loaded.corpus.document_count(), HANDBOOK_DOCUMENT_COUNT);
    assert_eq!(loaded.documents_skipped, 0);
}

#[test]
fn test_frontmatter_reaches_documents() {
    let corpus = TestCorpus::handbook();
    let loaded = pipeline().load_corpus(corpus.path()).unwrap();

    let orchard = &loaded.corpus.sections[1];
    assert_eq!(orchard.document.title, "Orchard");
    assert_eq!(orchard.document.order, 1.0);
    assert!(orchard.document.is_final);
    assert!(!orchard.document.content.contains("title:"));

    let pruning = &orchard.subsections[0];
    assert_eq!(pruning.id, "pruning");
    assert!(!pruning.is_final);
}

#[test]
fn test_drawer_and_hidden_folders_skipped() {
    let corpus = TestCorpus::handbook();
    let (blocks, _) = pipeline().index_directory(corpus.path()).unwrap();

    assert!(blocks.iter().all(|b| !b.content.contains("zucchini")));
    assert!(blocks.iter().all(|b| b.subsection.as_deref() != Some("drawer")));
}

#[test]
fn test_handbook_blocks() {
    let corpus = TestCorpus::handbook();
    let (blocks, stats) = pipeline().index_directory(corpus.path()).unwrap();

    let ids: Vec<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "about#intro",
            "about#contact",
            "orchard#intro",
            "orchard#apple-trees",
            "orchard#pests",
            "orchard#graft",
            "orchard#rootstock",
            "orchard/pruning#winter-pruning",
            "garden#vegetables",
        ]
    );
    assert_eq!(stats.blocks_indexed, HANDBOOK_BLOCK_COUNT);
    assert_eq!(stats.drawer_blocks, 2);
    assert_eq!(stats.documents_indexed, HANDBOOK_DOCUMENT_COUNT);
}

#[test]
fn test_intro_skips_title_lines() {
    let corpus = TestCorpus::handbook();
    let (blocks, _) = pipeline().index_directory(corpus.path()).unwrap();

    let intro = blocks.iter().find(|b| b.id == "orchard#intro").unwrap();
    assert_eq!(intro.kind, BlockKind::Intro);
    assert_eq!(intro.title, "Introduction");
    assert_eq!(intro.content, "Everything about trees.");
}

#[test]
fn test_drawer_entries() {
    let corpus = TestCorpus::handbook();
    let (blocks, _) = pipeline().index_directory(corpus.path()).unwrap();

    let graft = blocks.iter().find(|b| b.id == "orchard#graft").unwrap();
    assert!(graft.is_drawer());
    assert_eq!(graft.title, "Grafting");
    assert_eq!(graft.content, "Joining a scion to a rootstock.");

    let rootstock = blocks.iter().find(|b| b.id == "orchard#rootstock").unwrap();
    assert_eq!(rootstock.title, "The lower part of a...");
}

#[test]
fn test_about_section_titles_patched() {
    let corpus = TestCorpus::handbook();
    let (blocks, _) = pipeline().index_directory(corpus.path()).unwrap();

    for block in blocks.iter().filter(|b| b.section == "about") {
        assert_eq!(block.section_title, "About");
    }
    let orchard = blocks.iter().find(|b| b.section == "orchard").unwrap();
    assert_eq!(orchard.section_title, "Orchard");
}

#[test]
fn test_subsection_blocks_carry_both_titles() {
    let corpus = TestCorpus::handbook();
    let (blocks, _) = pipeline().index_directory(corpus.path()).unwrap();

    let winter = blocks
        .iter()
        .find(|b| b.anchor == "winter-pruning")
        .unwrap();
    assert_eq!(winter.section_title, "Orchard");
    assert_eq!(winter.subsection.as_deref(), Some("pruning"));
    assert_eq!(winter.subsection_title.as_deref(), Some("Pruning"));
}

#[test]
fn test_unreadable_document_counted() {
    let corpus = TestCorpus::with_files(&[("guide/guide.md", "## Ok\nfine")]);
    let broken = corpus.path().join("broken");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("broken.md"), [0xff, 0xfe, 0x00]).unwrap();

    let loaded = pipeline().load_corpus(corpus.path()).unwrap();
    assert_eq!(loaded.corpus.sections.len(), 1);
    assert_eq!(loaded.documents_skipped, 1);
}

#[test]
fn test_missing_corpus_root() {
    let result = pipeline().load_corpus(std::path::Path::new("/nonexistent/handbook"));
    assert!(result.is_err());
    assert!(result.unwrap_err().is_not_found());
}

#[test]
fn test_generated_corpus() {
    let corpus = TestCorpus::generated(5, 2);
    let (blocks, stats) = pipeline().index_directory(corpus.path()).unwrap();

    assert_eq!(stats.documents_indexed, 15);
    // Intro plus five topics per document
    assert_eq!(blocks.len(), 15 * 6);
    assert_eq!(blocks[0].id, "section-0#intro");
    assert_eq!(blocks[6].id, "section-0/sub-0#intro");
}

#[test]
fn test_corpus_root_inside_drawer_directory() {
    let corpus = TestCorpus::with_files(&[
        ("drawer/handbook/guide/guide.md", "## Setup\nInstall it."),
        ("drawer/handbook/guide/drawer/drawer.md", "## Hidden\nnot a subsection"),
    ]);
    let root = corpus.path().join("drawer/handbook");
    let config = Config::default();
    let pipeline =
        IndexingPipeline::new(config.corpus.exclude_patterns, config.corpus.max_file_size_mb)
            .unwrap();

    let loaded = pipeline.load_corpus(&root).unwrap();
    assert_eq!(loaded.corpus.sections.len(), 1);
    assert_eq!(loaded.corpus.sections[0].document.id, "guide");
    assert!(loaded.corpus.sections[0].subsections.is_empty());
}

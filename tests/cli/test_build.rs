//! Tests for the build-index CLI command

use crate::cli::test_helpers::{create_cli_test_services, default_cli_services};
use crate::common::{test_config, TestCorpus, HANDBOOK_BLOCK_COUNT};
use handbook_search::cli::commands::build::{execute, BuildArgs};
use handbook_search::cli::OutputFormat;
use handbook_search::core::storage::IndexSnapshot;
use tempfile::TempDir;

fn args(corpus: Option<std::path::PathBuf>, output: Option<std::path::PathBuf>) -> BuildArgs {
    BuildArgs {
        corpus,
        output,
        exclude: Vec::new(),
        quiet: true,
    }
}

#[tokio::test]
async fn test_build_writes_snapshot() {
    let corpus = TestCorpus::handbook();
    let out = TempDir::new().unwrap();
    let output = out.path().join("public").join("search-index.json");

    let result = execute(
        args(Some(corpus.path().to_path_buf()), Some(output.clone())),
        &default_cli_services(),
        OutputFormat::Human,
    )
    .await;
    assert!(result.is_ok(), "Build should succeed: {:?}", result.err());

    let snapshot = IndexSnapshot::load(&output).unwrap();
    assert_eq!(snapshot.block_count, HANDBOOK_BLOCK_COUNT);
}

#[tokio::test]
async fn test_build_json_output() {
    let corpus = TestCorpus::handbook();
    let out = TempDir::new().unwrap();

    let result = execute(
        args(
            Some(corpus.path().to_path_buf()),
            Some(out.path().join("index.json")),
        ),
        &default_cli_services(),
        OutputFormat::Json,
    )
    .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_build_uses_configured_paths() {
    let corpus = TestCorpus::handbook();
    let out = TempDir::new().unwrap();

    let mut config = test_config(corpus.path());
    config.export.path = out.path().join("configured.json");
    let services = create_cli_test_services(config);

    execute(args(None, None), &services, OutputFormat::Human)
        .await
        .unwrap();
    assert!(out.path().join("configured.json").is_file());
}

#[tokio::test]
async fn test_build_custom_exclude() {
    let corpus = TestCorpus::handbook();
    let out = TempDir::new().unwrap();
    let output = out.path().join("index.json");

    let mut build_args = args(Some(corpus.path().to_path_buf()), Some(output.clone()));
    build_args.exclude = vec!["**/garden".to_string()];
    execute(build_args, &default_cli_services(), OutputFormat::Human)
        .await
        .unwrap();

    let snapshot = IndexSnapshot::load(&output).unwrap();
    assert!(snapshot.blocks.iter().all(|b| b.section != "garden"));
    // Configured drawer exclusions still apply alongside -e
    assert!(snapshot
        .blocks
        .iter()
        .all(|b| b.subsection.as_deref() != Some("drawer")));
    assert!(snapshot.blocks.iter().all(|b| !b.content.contains("zucchini")));
}

#[tokio::test]
async fn test_build_without_corpus_fails() {
    let result = execute(args(None, None), &default_cli_services(), OutputFormat::Human).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("No corpus"));
}

#[tokio::test]
async fn test_build_nonexistent_corpus_fails() {
    let result = execute(
        args(Some("/nonexistent/handbook".into()), None),
        &default_cli_services(),
        OutputFormat::Human,
    )
    .await;
    assert!(result.unwrap_err().to_string().contains("not a directory"));
}

#[tokio::test]
async fn test_build_empty_corpus_fails_export() {
    let corpus = TestCorpus::with_files(&[("notes/readme.txt", "nothing")]);
    let out = TempDir::new().unwrap();

    let result = execute(
        args(
            Some(corpus.path().to_path_buf()),
            Some(out.path().join("index.json")),
        ),
        &default_cli_services(),
        OutputFormat::Human,
    )
    .await;
    assert!(result.unwrap_err().to_string().contains("Export failed"));
}

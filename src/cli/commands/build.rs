//! Build command - index a corpus and export the snapshot

use crate::cli::output::{colors, format_duration, print_success, print_warning};
use crate::cli::OutputFormat;
use crate::core::indexer::IndexingPipeline;
use crate::core::search::SearchIndex;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the build-index command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Corpus root (defaults to `corpus.root` from the configuration)
    pub corpus: Option<PathBuf>,

    /// Snapshot file to write (defaults to `export.path`)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Extra directory patterns to exclude, added to `corpus.exclude_patterns`
    /// (can be specified multiple times)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Build result response
#[derive(Debug, Serialize)]
pub struct BuildResponse {
    pub corpus: String,
    pub output: String,
    pub documents_indexed: usize,
    pub documents_skipped: usize,
    pub blocks_indexed: usize,
    pub drawer_blocks: usize,
    pub duration_secs: f64,
}

/// Execute the build-index command
pub async fn execute(
    args: BuildArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;

    let corpus = args
        .corpus
        .or_else(|| config.corpus.root.clone())
        .ok_or("No corpus given. Pass a corpus directory or set corpus.root in the configuration.")?;

    if !corpus.is_dir() {
        return Err(format!(
            "Corpus '{}' is not a directory. Point build-index at the handbook root.",
            corpus.display()
        )
        .into());
    }

    let output = args.output.unwrap_or_else(|| config.export.path.clone());

    let pipeline = if args.exclude.is_empty() {
        services.create_pipeline()?
    } else {
        let mut exclude = config.corpus.exclude_patterns.clone();
        exclude.extend(args.exclude);
        IndexingPipeline::new(exclude, config.corpus.max_file_size_mb)?
    };

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Indexing {}...",
            colors::file_path(&corpus.display().to_string())
        );
    }

    let start = Instant::now();
    let loaded = pipeline.load_corpus(&corpus)?;
    let index = SearchIndex::build(&loaded.corpus, &config.search)?;
    index.save(&output)?;
    let duration_secs = start.elapsed().as_secs_f64();

    let stats = index.stats();
    let response = BuildResponse {
        corpus: corpus.to_string_lossy().into_owned(),
        output: output.to_string_lossy().into_owned(),
        documents_indexed: stats.documents_indexed,
        documents_skipped: loaded.documents_skipped,
        blocks_indexed: stats.blocks_indexed,
        drawer_blocks: stats.drawer_blocks,
        duration_secs,
    };

    match format {
        OutputFormat::Human => {
            if response.documents_skipped > 0 {
                print_warning(&format!(
                    "{} documents could not be read (see log)",
                    response.documents_skipped
                ));
            }
            println!(
                "{} {} documents ({} blocks, {} drawer entries) in {}",
                colors::success("Indexed"),
                colors::number(&response.documents_indexed.to_string()),
                colors::number(&response.blocks_indexed.to_string()),
                colors::number(&response.drawer_blocks.to_string()),
                colors::number(&format_duration(response.duration_secs))
            );
            print_success(&format!("Wrote {}", response.output));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

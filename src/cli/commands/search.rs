//! Search command - query a handbook

use crate::cli::output::{colors, render_snippet, truncate_chars};
use crate::cli::OutputFormat;
use crate::core::search::SearchIndex;
use crate::core::services::Services;
use crate::core::types::{MatchField, SearchHit};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (matched literally, case-insensitive)
    pub query: String,

    /// Snapshot file written by build-index
    #[arg(long, short = 'i', conflicts_with = "corpus")]
    pub index: Option<PathBuf>,

    /// Corpus directory to index before searching
    #[arg(long, short = 'c')]
    pub corpus: Option<PathBuf>,

    /// Maximum number of results
    #[arg(long, short = 'k', default_value = "10")]
    pub limit: usize,

    /// Only show title matches
    #[arg(long)]
    pub titles_only: bool,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub id: String,
    pub block_id: String,
    pub field: MatchField,
    pub title: String,
    pub section_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsection_title: Option<String>,
    pub is_drawer: bool,
    pub snippet: String,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<SearchResultItem>,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let services = resolve_services(&args, services)?;
    let hits = services.search(&args.query).await?;

    let limit = args.limit.max(1);
    let results: Vec<SearchResultItem> = hits
        .into_iter()
        .filter(|hit| !args.titles_only || hit.field == MatchField::Title)
        .take(limit)
        .enumerate()
        .map(|(i, hit)| to_item(i + 1, hit))
        .collect();

    let output = SearchResponseOutput {
        query: args.query.clone(),
        total_results: results.len(),
        results,
    };

    match format {
        OutputFormat::Human => {
            if output.results.is_empty() {
                println!("No results found for '{}'", colors::label(&args.query));
            } else {
                println!(
                    "Found {} result(s):\n",
                    colors::number(&output.total_results.to_string())
                );

                let tag = &services.config.search.highlight_tag;
                for result in &output.results {
                    let location = match &result.subsection_title {
                        Some(sub) => format!("{} / {}", result.section_title, sub),
                        None => result.section_title.clone(),
                    };
                    println!(
                        "[{}] {} {}",
                        colors::rank(&result.rank.to_string()),
                        colors::label(&result.title),
                        colors::dim(&format!("({location})"))
                    );
                    println!("    {}", colors::block_id(&result.block_id));
                    if result.field == MatchField::Content {
                        for line in result.snippet.lines().filter(|l| !l.trim().is_empty()).take(5) {
                            println!("    {}", render_snippet(&truncate_chars(line, 120), tag));
                        }
                    }
                    println!();
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Pick the index to search: an explicit snapshot, an explicit corpus,
/// the configured corpus, or the configured export path.
fn resolve_services(
    args: &SearchArgs,
    services: &Arc<Services>,
) -> Result<Arc<Services>, Box<dyn std::error::Error>> {
    let config = (*services.config).clone();

    if let Some(path) = &args.index {
        let index = SearchIndex::load(path, &config.search)?;
        return Ok(Arc::new(Services::from_index(config, index)));
    }

    if let Some(corpus) = &args.corpus {
        let mut config = config;
        config.corpus.root = Some(corpus.clone());
        return Ok(Arc::new(Services::new(config)?));
    }

    if config.corpus.root.is_some() {
        return Ok(Arc::clone(services));
    }

    if config.export.path.is_file() {
        let index = SearchIndex::load(&config.export.path, &config.search)?;
        return Ok(Arc::new(Services::from_index(config, index)));
    }

    Err("Nothing to search. Pass --index FILE or --corpus DIR.".into())
}

fn to_item(rank: usize, hit: SearchHit) -> SearchResultItem {
    SearchResultItem {
        rank,
        id: hit.id,
        block_id: hit.block_id,
        field: hit.field,
        title: hit.doc.title,
        section_title: hit.doc.section_title,
        subsection_title: hit.doc.subsection_title,
        is_drawer: hit.doc.is_drawer,
        snippet: hit.snippet,
    }
}

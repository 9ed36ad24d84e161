//! Config command - show current configuration

use crate::cli::output::print_header;
use crate::cli::OutputFormat;
use crate::core::config::{CorpusConfig, ExportConfig, SearchConfig};
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also show where configuration is looked up
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    pub corpus: CorpusConfig,
    pub search: SearchConfig,
    pub export: ExportConfig,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    xdg: &XdgDirs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;

    let response = ConfigResponse {
        config_file: args
            .all
            .then(|| xdg.config_file().to_string_lossy().into_owned()),
        corpus: config.corpus.clone(),
        search: config.search.clone(),
        export: config.export.clone(),
    };

    match format {
        OutputFormat::Human => {
            print_header("Configuration:");
            if let Some(file) = &response.config_file {
                println!("  config_file: {file}");
            }
            println!("  corpus:");
            match &response.corpus.root {
                Some(root) => println!("    root: {}", root.display()),
                None => println!("    root: <unset>"),
            }
            println!(
                "    exclude_patterns: {:?}",
                response.corpus.exclude_patterns
            );
            println!(
                "    max_file_size_mb: {}",
                response.corpus.max_file_size_mb
            );
            println!("  search:");
            println!("    max_candidates: {}", response.search.max_candidates);
            println!("    max_results: {}", response.search.max_results);
            println!(
                "    max_query_length: {}",
                response.search.max_query_length
            );
            println!("    highlight_tag: {}", response.search.highlight_tag);
            println!("  export:");
            println!("    path: {}", response.export.path.display());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

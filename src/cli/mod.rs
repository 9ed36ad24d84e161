//! CLI adapter for handbook search
//!
//! Provides the command-line interface for building, querying and
//! inspecting handbook indexes. Depends on `core/` only.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!                       v
//!              +------------------+
//!              |      cli/        |
//!              | (clap adapter)   |
//!              +------------------+
//! ```

pub mod commands;
pub mod output;

use crate::core::error::SearchError;
use clap::{Parser, Subcommand};

/// handbook-search - Full-text search for markdown handbooks
///
/// Splits a handbook into heading blocks, indexes them with BM25 and
/// answers queries with highlighted snippets.
#[derive(Parser, Debug)]
#[command(name = "handbook-search")]
#[command(version)]
#[command(about = "Full-text search for markdown handbooks", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an index from a corpus directory and export it as JSON
    #[command(name = "build-index")]
    BuildIndex(commands::BuildArgs),

    /// Search a handbook
    Search(commands::SearchArgs),

    /// Print the blocks extracted from one markdown file
    Extract(commands::ExtractArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  handbook-search completions bash > ~/.local/share/bash-completion/completions/handbook-search
    ///   zsh:   handbook-search completions zsh > ~/.zfunc/_handbook-search
    ///   fish:  handbook-search completions fish > ~/.config/fish/completions/handbook-search.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let xdg = XdgDirs::new();
    xdg.log_paths();

    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();
    let services = Arc::new(Services::new(config)?);

    match cli.command {
        Commands::BuildIndex(args) => commands::build::execute(args, &services, cli.format).await,
        Commands::Search(args) => commands::search::execute(args, &services, cli.format).await,
        Commands::Extract(args) => commands::extract::execute(args, cli.format),
        Commands::ShowConfig(args) => {
            commands::config::execute(args, &services, &xdg, cli.format).await
        }
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}

/// Process exit code for an error returned by [`run`]
///
/// - `2`: invalid input (query, snapshot, configuration)
/// - `3`: corpus or path not found
/// - `4`: export failed, no snapshot written
/// - `1`: anything else
pub fn exit_code(err: &(dyn std::error::Error + 'static)) -> i32 {
    match err.downcast_ref::<SearchError>() {
        Some(e) if e.is_bad_request() => 2,
        Some(e) if e.is_not_found() => 3,
        Some(e) if e.is_fatal_export() => 4,
        _ => 1,
    }
}

//! handbook-search - command-line interface for handbook search
//!
//! # Examples
//!
//! ```bash
//! # Build and export an index
//! handbook-search build-index ./content -o public/search-index.json
//!
//! # Search the exported index
//! handbook-search search "apple" --index public/search-index.json
//!
//! # Search a corpus directly
//! handbook-search search "apple" --corpus ./content --format json
//! ```

use clap::Parser;
use handbook_search::cli::output::print_error;
use handbook_search::cli::{exit_code, run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handbook_search=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(exit_code(e.as_ref()));
    }
}

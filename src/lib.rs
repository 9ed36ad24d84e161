//! handbook-search - Full-text search for markdown handbooks
//!
//! Splits a handbook (sections and subsections of markdown files with
//! frontmatter) into heading blocks, indexes them with BM25 via Tantivy
//! and answers queries with highlighted snippets.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - indexer (corpus walking, frontmatter, block extraction)
//!   - storage (Tantivy index, JSON snapshots)
//!   - search (query engine, highlighting)
//!   - services (readiness gate)
//!
//! - **cli**: clap adapter (depends on core)
//!
//! # Example
//!
//! ```no_run
//! use handbook_search::{Config, Services};
//!
//! # async fn demo() -> handbook_search::Result<()> {
//! let mut config = Config::default();
//! config.corpus.root = Some("./content".into());
//!
//! let services = Services::new(config)?;
//! for hit in services.search("apple").await? {
//!     println!("{} {}", hit.id, hit.snippet);
//! }
//! # Ok(())
//! # }
//! ```

// Core domain logic
pub mod core;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{Result, SearchError};
pub use crate::core::search::SearchIndex;
pub use crate::core::services::Services;
pub use crate::core::storage::IndexSnapshot;
pub use crate::core::types::*;

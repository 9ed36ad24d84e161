//! Core domain logic (interface-agnostic)
//!
//! This module contains all logic that is independent of the CLI.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Corpus, block and hit structures
//! - **xdg**: XDG directory handling
//! - **indexer**: Corpus walking, frontmatter, block extraction
//! - **storage**: Tantivy block index and JSON snapshots
//! - **search**: Query execution and highlighting
//! - **services**: Service container and readiness gate

pub mod config;
pub mod error;
pub mod indexer;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, SearchError};
pub use services::Services;

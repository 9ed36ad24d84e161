//! Error types and error handling for handbook search.
//!
//! Extraction is permissive and never produces errors; these types
//! cover corpus loading, index construction, querying, export and
//! configuration. CLI-specific reporting happens in the adapter.

use thiserror::Error;

/// Result type alias for handbook search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Main error type for handbook search
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Corpus not found: {0}")]
    CorpusNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Indexing failed: {0}")]
    IndexingFailed(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl SearchError {
    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SearchError::CorpusNotFound(_) | SearchError::InvalidPath(_)
        )
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            SearchError::InvalidQuery(_)
                | SearchError::InvalidSnapshot(_)
                | SearchError::ConfigError(_)
        )
    }

    /// Export failures mean no snapshot was written
    pub fn is_fatal_export(&self) -> bool {
        matches!(self, SearchError::ExportFailed(_))
    }
}

//! Configuration management for handbook search.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{Result, SearchError};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "handbook-search.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Corpus loading configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Default corpus root (overridden by CLI arguments)
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Directory patterns to skip (glob syntax)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Maximum document size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Candidates fetched per field before the precision filter
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Maximum hits returned per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Maximum query string length (characters)
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,

    /// Element name wrapped around matches in snippets
    #[serde(default = "default_highlight_tag")]
    pub highlight_tag: String,
}

/// Export configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Default snapshot path
    #[serde(default = "default_export_path")]
    pub path: PathBuf,
}

// Default value functions
fn default_exclude_patterns() -> Vec<String> {
    vec!["**/drawer".to_string(), "**/drawer/**".to_string()]
}

fn default_max_file_size() -> usize {
    10
}

fn default_max_candidates() -> usize {
    100
}

fn default_max_results() -> usize {
    100
}

fn default_max_query_length() -> usize {
    500
}

fn default_highlight_tag() -> String {
    "mark".to_string()
}

fn default_export_path() -> PathBuf {
    PathBuf::from("search-index.json")
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: None,
            exclude_patterns: default_exclude_patterns(),
            max_file_size_mb: default_max_file_size(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_candidates: default_max_candidates(),
            max_results: default_max_results(),
            max_query_length: default_max_query_length(),
            highlight_tag: default_highlight_tag(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: default_export_path(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| SearchError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. HANDBOOK_SEARCH_CONFIG env var
    /// 2. XDG config file (~/.config/handbook-search/config.toml)
    /// 3. ./handbook-search.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("HANDBOOK_SEARCH_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new(LOCAL_CONFIG_FILE).exists() {
                Self::from_file(LOCAL_CONFIG_FILE)?
            } else {
                Self::default()
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Corpus configuration
        if let Ok(root) = env::var("HANDBOOK_SEARCH_CORPUS") {
            self.corpus.root = Some(PathBuf::from(root));
        }
        if let Ok(max_size) = env::var("HANDBOOK_SEARCH_MAX_FILE_SIZE_MB") {
            if let Ok(size) = max_size.parse() {
                self.corpus.max_file_size_mb = size;
            }
        }

        // Search configuration
        if let Ok(max_candidates) = env::var("HANDBOOK_SEARCH_MAX_CANDIDATES") {
            if let Ok(n) = max_candidates.parse() {
                self.search.max_candidates = n;
            }
        }
        if let Ok(max_results) = env::var("HANDBOOK_SEARCH_MAX_RESULTS") {
            if let Ok(n) = max_results.parse() {
                self.search.max_results = n;
            }
        }
        if let Ok(max_query_len) = env::var("HANDBOOK_SEARCH_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_query_len.parse() {
                self.search.max_query_length = len;
            }
        }
        if let Ok(tag) = env::var("HANDBOOK_SEARCH_HIGHLIGHT_TAG") {
            self.search.highlight_tag = tag;
        }

        // Export configuration
        if let Ok(path) = env::var("HANDBOOK_SEARCH_EXPORT_PATH") {
            self.export.path = PathBuf::from(path);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.corpus.max_file_size_mb == 0 {
            return Err(SearchError::ConfigError(
                "Max file size must be non-zero".to_string(),
            ));
        }

        if self.search.max_candidates == 0 {
            return Err(SearchError::ConfigError(
                "Max candidates must be non-zero".to_string(),
            ));
        }

        if self.search.max_results == 0 {
            return Err(SearchError::ConfigError(
                "Max results must be non-zero".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(SearchError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        let tag = &self.search.highlight_tag;
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(SearchError::ConfigError(format!(
                "Highlight tag '{tag}' must be a plain element name"
            )));
        }

        if self.export.path.as_os_str().is_empty() {
            return Err(SearchError::ConfigError(
                "Export path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        match &self.corpus.root {
            Some(root) => tracing::info!("  Corpus root: {:?}", root),
            None => tracing::info!("  Corpus root: <unset>"),
        }
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.corpus.exclude_patterns.len()
        );
        tracing::info!("  Max file size: {} MB", self.corpus.max_file_size_mb);
        tracing::info!("  Max candidates: {}", self.search.max_candidates);
        tracing::info!("  Max results: {}", self.search.max_results);
        tracing::info!("  Max query length: {}", self.search.max_query_length);
        tracing::info!("  Highlight tag: <{}>", self.search.highlight_tag);
        tracing::info!("  Export path: {:?}", self.export.path);
    }
}

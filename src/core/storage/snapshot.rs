//! JSON snapshots of a built index.
//!
//! A snapshot holds the block records of an index so it can be
//! written once at build time (`search-index.json`) and hydrated later
//! without re-reading the markdown corpus.

use crate::core::error::{Result, SearchError};
use crate::core::types::Block;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current snapshot format
/// Version 1: block records with camelCase fields and `kind`
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Serialized form of an index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSnapshot {
    pub format_version: u32,
    pub generated_at: DateTime<Utc>,
    pub block_count: usize,
    pub blocks: Vec<Block>,
}

impl IndexSnapshot {
    /// Wrap the blocks of a built index.
    ///
    /// An index without blocks was never built; exporting it is a
    /// hard failure.
    pub fn new(blocks: Vec<Block>) -> Result<Self> {
        if blocks.is_empty() {
            return Err(SearchError::ExportFailed(
                "Index contains no blocks; was it built from an empty corpus?".to_string(),
            ));
        }

        Ok(Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            generated_at: Utc::now(),
            block_count: blocks.len(),
            blocks,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: IndexSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Write the snapshot to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, self.to_json()?)?;
        tracing::info!("Wrote {} blocks to {:?}", self.block_count, path);
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SearchError::InvalidPath(format!(
                "Index file {} does not exist",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn validate(&self) -> Result<()> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SearchError::InvalidSnapshot(format!(
                "Snapshot format v{} is not supported (current: v{}). \
                 Rebuild it with `handbook-search build-index`.",
                self.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        if self.block_count != self.blocks.len() {
            return Err(SearchError::InvalidSnapshot(format!(
                "Snapshot declares {} blocks but contains {}",
                self.block_count,
                self.blocks.len()
            )));
        }

        Ok(())
    }
}

//! Corpus sources for the readiness gate.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::{Result, SearchError};
use crate::core::indexer::walker::{CorpusWalker, LoadedCorpus};
use crate::core::types::Corpus;

/// Where the documents of an index come from
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Human-readable origin (e.g. the corpus root)
    fn describe(&self) -> String;

    /// Load the whole corpus
    async fn load(&self) -> Result<LoadedCorpus>;
}

/// Corpus read from a directory tree
pub struct FsCorpusSource {
    root: PathBuf,
    walker: Arc<CorpusWalker>,
}

impl FsCorpusSource {
    pub fn new(root: impl Into<PathBuf>, walker: CorpusWalker) -> Self {
        Self {
            root: root.into(),
            walker: Arc::new(walker),
        }
    }
}

#[async_trait]
impl CorpusSource for FsCorpusSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn load(&self) -> Result<LoadedCorpus> {
        let walker = Arc::clone(&self.walker);
        let root = self.root.clone();

        tokio::task::spawn_blocking(move || walker.load(&root))
            .await
            .map_err(|e| SearchError::IndexingFailed(format!("Corpus load task failed: {e}")))?
    }
}

/// Corpus held in memory
pub struct StaticCorpusSource {
    corpus: Corpus,
}

impl StaticCorpusSource {
    pub fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }
}

#[async_trait]
impl CorpusSource for StaticCorpusSource {
    fn describe(&self) -> String {
        format!("<memory: {} documents>", self.corpus.document_count())
    }

    async fn load(&self) -> Result<LoadedCorpus> {
        Ok(LoadedCorpus {
            corpus: self.corpus.clone(),
            documents_skipped: 0,
        })
    }
}

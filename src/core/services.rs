//! Unified service container for handbook search
//!
//! Owns the readiness gate: the index is built at most once per
//! container, on first use, and shared by every clone afterwards.

use crate::core::config::Config;
use crate::core::error::{Result, SearchError};
use crate::core::indexer::{CorpusSource, CorpusWalker, FsCorpusSource, IndexingPipeline};
use crate::core::search::SearchIndex;
use crate::core::types::SearchHit;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,

    /// Where the corpus is loaded from on first use
    source: Option<Arc<dyn CorpusSource>>,

    /// Built index, set once
    index: Arc<OnceCell<Arc<SearchIndex>>>,
}

impl Services {
    /// Create services from configuration
    ///
    /// The corpus is read from `corpus.root`; without one the index can
    /// only be provided through [`Services::from_index`].
    pub fn new(config: Config) -> Result<Self> {
        let source: Option<Arc<dyn CorpusSource>> = match &config.corpus.root {
            Some(root) => {
                let walker = CorpusWalker::new(
                    config.corpus.exclude_patterns.clone(),
                    config.corpus.max_file_size_mb,
                )?;
                Some(Arc::new(FsCorpusSource::new(root.clone(), walker)))
            }
            None => None,
        };

        Ok(Self {
            config: Arc::new(config),
            source,
            index: Arc::new(OnceCell::new()),
        })
    }

    /// Create services that load from an explicit source
    pub fn with_source(config: Config, source: Arc<dyn CorpusSource>) -> Self {
        Self {
            config: Arc::new(config),
            source: Some(source),
            index: Arc::new(OnceCell::new()),
        }
    }

    /// Wrap an index that is already built (or hydrated)
    pub fn from_index(config: Config, index: SearchIndex) -> Self {
        Self {
            config: Arc::new(config),
            source: None,
            index: Arc::new(OnceCell::new_with(Some(Arc::new(index)))),
        }
    }

    /// Build the index if it has not been built yet.
    ///
    /// Concurrent callers wait for the same build. A failed build leaves
    /// the gate closed so a later call can retry.
    pub async fn initialize_index(&self) -> Result<Arc<SearchIndex>> {
        let index = self
            .index
            .get_or_try_init(|| async {
                let source = self.source.as_ref().ok_or_else(|| {
                    SearchError::CorpusNotFound("no corpus root configured".to_string())
                })?;

                tracing::info!("Building search index from {}", source.describe());
                let loaded = source.load().await?;
                let index = SearchIndex::build(&loaded.corpus, &self.config.search)?;
                if loaded.documents_skipped > 0 {
                    tracing::warn!("{} documents could not be loaded", loaded.documents_skipped);
                }

                Ok::<_, SearchError>(Arc::new(index))
            })
            .await?;

        Ok(Arc::clone(index))
    }

    /// Whether the index has been built
    pub fn is_ready(&self) -> bool {
        self.index.initialized()
    }

    /// Wait for the index, then run `query` against it
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let index = self.initialize_index().await?;
        index.search(query)
    }

    /// Create an IndexingPipeline from the corpus settings
    pub fn create_pipeline(&self) -> Result<IndexingPipeline> {
        IndexingPipeline::new(
            self.config.corpus.exclude_patterns.clone(),
            self.config.corpus.max_file_size_mb,
        )
    }
}

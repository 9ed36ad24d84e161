//! Indexing pipeline orchestration.
//!
//! Coordinates the end-to-end extraction workflow:
//! 1. Walk the corpus directory
//! 2. Parse frontmatter of each document
//! 3. Extract heading, intro and drawer blocks
//! 4. Hand the flat block list to the index

use std::path::Path;
use std::time::Instant;

use crate::core::error::Result;
use crate::core::indexer::extractor::{extract_blocks, DocumentScope};
use crate::core::indexer::walker::{CorpusWalker, LoadedCorpus};
use crate::core::types::{Block, Corpus, IndexStats};

/// Orchestrates corpus loading and block extraction
pub struct IndexingPipeline {
    walker: CorpusWalker,
}

impl IndexingPipeline {
    /// Create a new indexing pipeline
    ///
    /// # Arguments
    ///
    /// * `exclude_patterns` - Glob patterns for directories to skip
    /// * `max_file_size_mb` - Maximum document size in megabytes
    pub fn new(exclude_patterns: Vec<String>, max_file_size_mb: usize) -> Result<Self> {
        let walker = CorpusWalker::new(exclude_patterns, max_file_size_mb)?;
        Ok(Self { walker })
    }

    /// Load the corpus under `root`
    pub fn load_corpus(&self, root: &Path) -> Result<LoadedCorpus> {
        tracing::info!("Loading corpus from {:?}", root);
        self.walker.load(root)
    }

    /// Load and extract in one step, returning blocks + stats
    pub fn index_directory(&self, root: &Path) -> Result<(Vec<Block>, IndexStats)> {
        let loaded = self.load_corpus(root)?;
        let (blocks, mut stats) = extract_corpus(&loaded.corpus);
        stats.documents_skipped = loaded.documents_skipped;
        Ok((blocks, stats))
    }
}

/// Extract blocks from every section and subsection body.
///
/// Section and subsection titles are passed through to each block.
pub fn extract_corpus(corpus: &Corpus) -> (Vec<Block>, IndexStats) {
    let start = Instant::now();
    let mut blocks = Vec::new();
    let mut documents_indexed = 0;

    for section in &corpus.sections {
        let doc = &section.document;
        let scope = DocumentScope::section(&doc.id, &doc.title);

        let extracted = extract_blocks(&doc.content, &scope);
        tracing::debug!("Extracted {} blocks from {}", extracted.len(), doc.id);
        blocks.extend(extracted);
        documents_indexed += 1;

        for sub in &section.subsections {
            let scope = scope.clone().subsection(&sub.id, &sub.title);
            let extracted = extract_blocks(&sub.content, &scope);
            tracing::debug!(
                "Extracted {} blocks from {}/{}",
                extracted.len(),
                doc.id,
                sub.id
            );
            blocks.extend(extracted);
            documents_indexed += 1;
        }
    }

    let drawer_blocks = blocks.iter().filter(|b| b.is_drawer()).count();
    let stats = IndexStats {
        documents_indexed,
        documents_skipped: 0,
        blocks_indexed: blocks.len(),
        drawer_blocks,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    (blocks, stats)
}

//! Search index and query execution.
//!
//! `SearchIndex` owns a read-only [`BlockIndex`] built from a corpus or
//! hydrated from a snapshot. Queries run in two stages:
//!
//! 1. recall: tokenized term/prefix queries against `title` and
//!    `content` independently, merged into one candidate list
//! 2. precision: the whole query must occur literally
//!    (case-insensitive) in the title or in the normalized content
//!
//! Each candidate yields up to two hits, `{id}-title` and
//! `{id}-content`. Title hits are listed before content hits; within
//! each group candidates keep their BM25 order.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use tantivy::collector::TopDocs;
use tantivy::Searcher;

use crate::core::config::SearchConfig;
use crate::core::error::{Result, SearchError};
use crate::core::indexer::normalizer::normalize;
use crate::core::indexer::pipeline::extract_corpus;
use crate::core::search::query::{build_field_query, query_terms, Highlighter};
use crate::core::storage::{BlockIndex, IndexSnapshot};
use crate::core::types::{Block, Corpus, IndexStats, MatchField, SearchHit, StoredBlock};

/// Queryable index over the blocks of one corpus
#[derive(Debug)]
pub struct SearchIndex {
    store: BlockIndex,
    settings: SearchConfig,
    stats: IndexStats,
}

impl SearchIndex {
    /// Build a fresh index from a loaded corpus.
    ///
    /// Every call builds a new index; nothing is shared with earlier
    /// builds.
    pub fn build(corpus: &Corpus, settings: &SearchConfig) -> Result<Self> {
        let start = Instant::now();
        let (blocks, mut stats) = extract_corpus(corpus);

        let store = BlockIndex::create_in_ram(&blocks)?;
        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexed {} blocks ({} drawer entries) from {} documents in {}ms",
            stats.blocks_indexed,
            stats.drawer_blocks,
            stats.documents_indexed,
            stats.duration_ms
        );

        Ok(Self {
            store,
            settings: settings.clone(),
            stats,
        })
    }

    /// Build an index directly from block records
    pub fn from_blocks(blocks: &[Block], settings: &SearchConfig) -> Result<Self> {
        let start = Instant::now();
        let store = BlockIndex::create_in_ram(blocks)?;

        let stats = IndexStats {
            documents_indexed: 0,
            documents_skipped: 0,
            blocks_indexed: blocks.len(),
            drawer_blocks: blocks.iter().filter(|b| b.is_drawer()).count(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        Ok(Self {
            store,
            settings: settings.clone(),
            stats,
        })
    }

    /// Hydrate an index from an exported snapshot
    pub fn from_snapshot(snapshot: &IndexSnapshot, settings: &SearchConfig) -> Result<Self> {
        tracing::debug!(
            "Hydrating {} blocks from snapshot generated at {}",
            snapshot.block_count,
            snapshot.generated_at
        );
        Self::from_blocks(&snapshot.blocks, settings)
    }

    /// Load a snapshot file and hydrate it
    pub fn load(path: &Path, settings: &SearchConfig) -> Result<Self> {
        let snapshot = IndexSnapshot::load(path)?;
        Self::from_snapshot(&snapshot, settings)
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.store.num_blocks()
    }

    pub fn is_empty(&self) -> bool {
        self.store.num_blocks() == 0
    }

    /// All indexed blocks, in insertion order
    pub fn blocks(&self) -> Result<Vec<Block>> {
        self.store.all_blocks()
    }

    /// Snapshot of this index. Fails when the index holds no blocks.
    pub fn export(&self) -> Result<IndexSnapshot> {
        IndexSnapshot::new(self.store.all_blocks()?)
    }

    pub fn export_json(&self) -> Result<String> {
        self.export()?.to_json()
    }

    /// Export and write to `path`
    pub fn save(&self, path: &Path) -> Result<IndexSnapshot> {
        let snapshot = self.export()?;
        snapshot.save(path)?;
        Ok(snapshot)
    }

    /// Execute a search query.
    ///
    /// An empty query returns no hits without touching the index. A
    /// query that cannot match anything also returns no hits; errors
    /// are reserved for internal index failures.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        if query.chars().count() > self.settings.max_query_length {
            tracing::warn!(
                "Ignoring query longer than {} characters",
                self.settings.max_query_length
            );
            return Ok(Vec::new());
        }

        let highlighter = Highlighter::new(query, &self.settings.highlight_tag)?;
        let searcher = self.store.searcher();
        let candidates = self.candidates(&searcher, query)?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut title_hits = Vec::new();
        let mut content_hits = Vec::new();

        for block in &candidates {
            if highlighter.is_match(&block.title) {
                let key = hit_key(block, MatchField::Title);
                if seen.insert(key.clone()) {
                    let snippet = highlighter.highlight(&block.title);
                    title_hits.push(SearchHit {
                        id: key,
                        block_id: block.id.clone(),
                        field: MatchField::Title,
                        doc: StoredBlock::from(block),
                        all_snippets: vec![snippet.clone()],
                        snippet,
                    });
                }
            }

            let plain = normalize(&block.content);
            if highlighter.is_match(&plain) {
                let key = hit_key(block, MatchField::Content);
                let all_snippets = highlighter.paragraph_snippets(&plain);
                let snippet = all_snippets.join("\n\n");
                if highlighter.has_marker(&snippet) && seen.insert(key.clone()) {
                    content_hits.push(SearchHit {
                        id: key,
                        block_id: block.id.clone(),
                        field: MatchField::Content,
                        doc: StoredBlock::from(block),
                        snippet,
                        all_snippets,
                    });
                }
            }
        }

        let mut hits = title_hits;
        hits.extend(content_hits);
        hits.truncate(self.settings.max_results);

        tracing::debug!(
            "Query {:?}: {} candidates, {} hits",
            query,
            candidates.len(),
            hits.len()
        );

        Ok(hits)
    }

    /// Recall stage: merged title and content candidates, deduplicated
    /// by block id in first-seen order.
    fn candidates(&self, searcher: &Searcher, query: &str) -> Result<Vec<Block>> {
        let fields = self.store.fields();
        let terms = query_terms(self.store.index(), fields.title, query)?;

        // Nothing tokenizable (e.g. "++"): every block is a candidate
        if terms.is_empty() {
            return self.store.all_blocks();
        }

        let limit = TopDocs::with_limit(self.settings.max_candidates);
        let mut seen: HashSet<String> = HashSet::new();
        let mut candidates = Vec::new();

        for field in [fields.title, fields.content] {
            let field_query = build_field_query(field, &terms)?;
            let top_docs = searcher
                .search(&*field_query, &limit)
                .map_err(|e| SearchError::SearchFailed(format!("Search failed: {e}")))?;

            for (_score, address) in top_docs {
                let (_ord, block) = self.store.stored_block(searcher, address)?;
                if seen.insert(block.id.clone()) {
                    candidates.push(block);
                }
            }
        }

        Ok(candidates)
    }
}

fn hit_key(block: &Block, field: MatchField) -> String {
    format!("{}-{}", block.id, field.suffix())
}

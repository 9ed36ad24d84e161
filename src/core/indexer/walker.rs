//! Corpus walker for the handbook directory layout.
//!
//! Expects `root/<section>/<section>.md` for sections and
//! `root/<section>/<sub>/<sub>.md` for subsections. Excluded
//! directories (drawer folders by default) and hidden directories
//! are never entered. Unreadable documents are logged and skipped
//! without aborting the walk.

use glob::Pattern;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{Result, SearchError};
use crate::core::indexer::frontmatter::parse_frontmatter;
use crate::core::types::{Corpus, Document, Section, UNORDERED};

/// A loaded corpus plus the number of documents that failed to load
#[derive(Debug, Clone, Default)]
pub struct LoadedCorpus {
    pub corpus: Corpus,
    pub documents_skipped: usize,
}

/// Directory walker that assembles the document tree
pub struct CorpusWalker {
    /// Directory patterns to skip (e.g., "**/drawer")
    exclude_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,
}

impl CorpusWalker {
    /// Create a new walker
    ///
    /// # Arguments
    ///
    /// * `exclude_patterns` - Glob patterns for directories to skip
    /// * `max_file_size_mb` - Maximum document size in megabytes
    ///
    /// # Returns
    ///
    /// A new `CorpusWalker` or an error if a pattern is invalid
    pub fn new(exclude_patterns: Vec<String>, max_file_size_mb: usize) -> Result<Self> {
        let exclude = exclude_patterns
            .into_iter()
            .map(|p| {
                Pattern::new(&p).map_err(|e| {
                    SearchError::ConfigError(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            exclude_patterns: exclude,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    /// Load every section and subsection under `root`
    pub fn load(&self, root: &Path) -> Result<LoadedCorpus> {
        if !root.is_dir() {
            return Err(SearchError::CorpusNotFound(format!("{}", root.display())));
        }

        let mut sections: BTreeMap<String, Section> = BTreeMap::new();
        let mut subsections: Vec<(String, PathBuf)> = Vec::new();
        let mut documents_skipped = 0;

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(2)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_enter(e, root))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let Some(id) = dir_name(entry.path()) else {
                continue;
            };

            if entry.depth() == 1 {
                match self.load_document(entry.path(), &id) {
                    Ok(Some(document)) => {
                        sections.insert(id, Section::new(document));
                    }
                    Ok(None) => {
                        tracing::warn!("Section directory {:?} has no {}.md", entry.path(), id);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load section {:?}: {}", entry.path(), e);
                        documents_skipped += 1;
                    }
                }
            } else if let Some(parent) = entry.path().parent().and_then(dir_name) {
                subsections.push((parent, entry.path().to_path_buf()));
            }
        }

        for (parent, dir) in subsections {
            let Some(id) = dir_name(&dir) else {
                continue;
            };
            let Some(section) = sections.get_mut(&parent) else {
                tracing::debug!("Skipping subsection {:?} of unloaded section", dir);
                continue;
            };
            match self.load_document(&dir, &id) {
                Ok(Some(document)) => section.subsections.push(document),
                Ok(None) => tracing::debug!("Directory {:?} has no {}.md", dir, id),
                Err(e) => {
                    tracing::warn!("Failed to load subsection {:?}: {}", dir, e);
                    documents_skipped += 1;
                }
            }
        }

        let mut corpus = Corpus::new(sections.into_values().collect());
        corpus.sort();

        tracing::info!(
            "Loaded {} documents in {} sections ({} skipped)",
            corpus.document_count(),
            corpus.sections.len(),
            documents_skipped
        );

        Ok(LoadedCorpus {
            corpus,
            documents_skipped,
        })
    }

    /// Read `<dir>/<id>.md`; `Ok(None)` when the file does not exist
    fn load_document(&self, dir: &Path, id: &str) -> Result<Option<Document>> {
        let path = dir.join(format!("{id}.md"));
        if !path.is_file() {
            return Ok(None);
        }

        let metadata = fs::metadata(&path)?;
        if metadata.len() > self.max_file_size_bytes {
            return Err(SearchError::IndexingFailed(format!(
                "Skipping large file: {path:?} ({} bytes)",
                metadata.len()
            )));
        }

        let raw = fs::read_to_string(&path).map_err(|e| {
            // Check if it's a UTF-8 error (likely binary file)
            if e.kind() == std::io::ErrorKind::InvalidData {
                SearchError::IndexingFailed(format!("Skipping non-UTF-8 file: {path:?}"))
            } else {
                SearchError::IndexingFailed(format!("Failed to read {path:?}: {e}"))
            }
        })?;

        tracing::debug!("Loaded {:?}", path);
        Ok(Some(document_from_source(id, &raw)))
    }

    /// Skip hidden and excluded directories. Never filters the root.
    ///
    /// Patterns match the path relative to `root`, so directories above
    /// the corpus never cause an exclusion.
    fn should_enter(&self, entry: &DirEntry, root: &Path) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        if let Some(name) = entry.file_name().to_str() {
            if name.starts_with('.') {
                return false;
            }
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        for pattern in &self.exclude_patterns {
            if pattern.matches_path(relative) {
                tracing::debug!("Skipping excluded directory: {:?}", path);
                return false;
            }
        }

        true
    }
}

/// Build a document from raw markdown and its directory id
pub fn document_from_source(id: &str, raw: &str) -> Document {
    let parsed = parse_frontmatter(raw);
    let fm = &parsed.frontmatter;

    Document {
        id: id.to_string(),
        title: fm.get_str("title").unwrap_or_else(|| id.to_string()),
        order: fm.get_number("order").unwrap_or(UNORDERED),
        is_final: fm.get_bool("final").unwrap_or(false),
        content: parsed.content,
        frontmatter: parsed.frontmatter.into_map(),
    }
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
}

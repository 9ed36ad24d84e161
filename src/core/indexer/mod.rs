//! Document indexing module.
//!
//! Turns a markdown corpus into a flat list of searchable blocks:
//!
//! - Corpus walking (sections and subsections on disk)
//! - Frontmatter parsing (`title`, `order`, `final`, ...)
//! - Block extraction (intro, `## ` headings, drawer entries)
//! - Plaintext normalization for matching and snippets
//! - Pipeline orchestration and source abstraction

pub mod extractor;
pub mod frontmatter;
pub mod normalizer;
pub mod pipeline;
pub mod source;
pub mod walker;

pub use extractor::{extract_blocks, slugify, DocumentScope};
pub use frontmatter::{parse_frontmatter, Frontmatter, FrontmatterValue, ParsedDocument};
pub use normalizer::normalize;
pub use pipeline::{extract_corpus, IndexingPipeline};
pub use source::{CorpusSource, FsCorpusSource, StaticCorpusSource};
pub use walker::{document_from_source, CorpusWalker, LoadedCorpus};

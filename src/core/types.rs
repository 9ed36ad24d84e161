//! Core data types for handbook search.
//!
//! Documents are what the corpus loader produces, blocks are what the
//! index stores, and hits are what a query returns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::indexer::frontmatter::FrontmatterValue;

/// Order assigned to documents whose frontmatter has no `order` key
pub const UNORDERED: f64 = f64::MAX;

/// A single markdown document (section or subsection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Directory name of the document, used as its slug
    pub id: String,

    /// Frontmatter `title`, falling back to the id
    pub title: String,

    /// Frontmatter `order`
    pub order: f64,

    /// Body with the frontmatter block removed
    pub content: String,

    /// Frontmatter `final` flag (false = beta)
    pub is_final: bool,

    /// All parsed frontmatter entries
    #[serde(default)]
    pub frontmatter: BTreeMap<String, FrontmatterValue>,
}

impl Document {
    /// Create a document without frontmatter
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            order: UNORDERED,
            content: content.into(),
            is_final: false,
            frontmatter: BTreeMap::new(),
        }
    }
}

/// A top-level section with its subsections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub document: Document,
    #[serde(default)]
    pub subsections: Vec<Document>,
}

impl Section {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            subsections: Vec::new(),
        }
    }

    pub fn with_subsection(mut self, subsection: Document) -> Self {
        self.subsections.push(subsection);
        self
    }
}

/// The whole document tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub sections: Vec<Section>,
}

impl Corpus {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Total number of documents (sections and subsections)
    pub fn document_count(&self) -> usize {
        self.sections.iter().map(|s| 1 + s.subsections.len()).sum()
    }

    /// Sort sections and subsections by `order`, then by id
    pub fn sort(&mut self) {
        fn by_order(a: &Document, b: &Document) -> std::cmp::Ordering {
            a.order
                .total_cmp(&b.order)
                .then_with(|| a.id.cmp(&b.id))
        }

        for section in &mut self.sections {
            section.subsections.sort_by(by_order);
        }
        self.sections
            .sort_by(|a, b| by_order(&a.document, &b.document));
    }
}

/// What produced a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Text preceding the first `##` heading
    Intro,
    /// A `##` heading region
    Heading,
    /// An entry under the drawer sentinel heading
    Drawer,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Intro => "intro",
            BlockKind::Heading => "heading",
            BlockKind::Drawer => "drawer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "intro" => Some(BlockKind::Intro),
            "heading" => Some(BlockKind::Heading),
            "drawer" => Some(BlockKind::Drawer),
            _ => None,
        }
    }
}

/// An indexable unit of content tied to one heading or drawer entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// `section[/subsection]#anchor`
    pub id: String,
    pub section: String,
    pub section_title: String,
    pub subsection: Option<String>,
    pub subsection_title: Option<String>,
    pub anchor: String,
    pub title: String,
    pub content: String,
    pub kind: BlockKind,
}

impl Block {
    pub fn is_drawer(&self) -> bool {
        self.kind == BlockKind::Drawer
    }
}

/// Stored block fields as returned with a search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBlock {
    pub title: String,
    pub section_title: String,
    pub section: String,
    pub subsection_title: Option<String>,
    pub subsection: Option<String>,
    pub content: String,
    pub anchor: String,
    pub is_drawer: bool,
}

impl From<&Block> for StoredBlock {
    fn from(block: &Block) -> Self {
        Self {
            title: block.title.clone(),
            section_title: block.section_title.clone(),
            section: block.section.clone(),
            subsection_title: block.subsection_title.clone(),
            subsection: block.subsection.clone(),
            content: block.content.clone(),
            anchor: block.anchor.clone(),
            is_drawer: block.is_drawer(),
        }
    }
}

/// Which field of a block a hit matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Title,
    Content,
}

impl MatchField {
    pub fn suffix(&self) -> &'static str {
        match self {
            MatchField::Title => "title",
            MatchField::Content => "content",
        }
    }
}

/// A single search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// `{block id}-title` or `{block id}-content`
    pub id: String,

    /// Id of the matched block
    pub block_id: String,

    pub field: MatchField,

    pub doc: StoredBlock,

    /// Highlighted excerpt
    pub snippet: String,

    /// Every highlighted paragraph
    pub all_snippets: Vec<String>,
}

/// Statistics from an index build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Documents (sections and subsections) extracted
    pub documents_indexed: usize,

    /// Documents that could not be loaded
    pub documents_skipped: usize,

    /// Total blocks in the index
    pub blocks_indexed: usize,

    /// Of which drawer entries
    pub drawer_blocks: usize,

    /// Build duration in milliseconds
    pub duration_ms: u64,
}

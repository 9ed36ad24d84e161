//! Tantivy integration for block indexing.
//!
//! This module wraps Tantivy operations for building an in-memory
//! index over extracted blocks and reading stored blocks back.

use crate::core::error::{Result, SearchError};
use crate::core::types::{Block, BlockKind};
use tantivy::schema::*;
use tantivy::{doc, DocAddress, Index, IndexReader, IndexWriter, ReloadPolicy, Searcher};

/// Writer heap (shared by the single indexing thread)
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Create the Tantivy schema for block indexing
///
/// Fields:
/// - title, content: full-text searchable (TEXT | STORED)
/// - id, section, subsection, anchor, kind: exact (STRING | STORED)
/// - sectionTitle, subsectionTitle: retrievable only (STORED)
/// - isDrawer: bool (STORED)
/// - ord: insertion position (STORED)
pub fn create_schema() -> Schema {
    let mut builder = Schema::builder();

    // Searchable text
    builder.add_text_field("title", TEXT | STORED);
    builder.add_text_field("content", TEXT | STORED);

    // Metadata (stored for retrieval)
    builder.add_text_field("id", STRING | STORED);
    builder.add_text_field("section", STRING | STORED);
    builder.add_text_field("sectionTitle", STORED);
    builder.add_text_field("subsection", STRING | STORED);
    builder.add_text_field("subsectionTitle", STORED);
    builder.add_text_field("anchor", STRING | STORED);
    builder.add_text_field("kind", STRING | STORED);
    builder.add_bool_field("isDrawer", STORED);
    builder.add_u64_field("ord", STORED);

    builder.build()
}

/// Resolved schema field handles
#[derive(Debug, Clone, Copy)]
pub struct BlockFields {
    pub title: Field,
    pub content: Field,
    pub id: Field,
    pub section: Field,
    pub section_title: Field,
    pub subsection: Field,
    pub subsection_title: Field,
    pub anchor: Field,
    pub kind: Field,
    pub is_drawer: Field,
    pub ord: Field,
}

impl BlockFields {
    fn resolve(schema: &Schema) -> Result<Self> {
        let field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|e| SearchError::StorageError(format!("Missing {name} field: {e}")))
        };

        Ok(Self {
            title: field("title")?,
            content: field("content")?,
            id: field("id")?,
            section: field("section")?,
            section_title: field("sectionTitle")?,
            subsection: field("subsection")?,
            subsection_title: field("subsectionTitle")?,
            anchor: field("anchor")?,
            kind: field("kind")?,
            is_drawer: field("isDrawer")?,
            ord: field("ord")?,
        })
    }
}

/// Read-only Tantivy index over a fixed set of blocks
pub struct BlockIndex {
    /// Tantivy index instance
    index: Index,

    /// Field handles
    fields: BlockFields,

    /// Reader opened after the build commit
    reader: IndexReader,

    /// Number of indexed blocks
    num_blocks: usize,
}

impl std::fmt::Debug for BlockIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockIndex")
            .field("schema", &"<schema>")
            .field("num_blocks", &self.num_blocks)
            .finish()
    }
}

impl BlockIndex {
    /// Build an in-memory index over `blocks`.
    ///
    /// A single indexing thread keeps document order, segment layout
    /// and scores identical for identical input.
    pub fn create_in_ram(blocks: &[Block]) -> Result<Self> {
        let schema = create_schema();
        let fields = BlockFields::resolve(&schema)?;
        let index = Index::create_in_ram(schema);

        let mut writer: IndexWriter = index
            .writer_with_num_threads(1, WRITER_HEAP_BYTES)
            .map_err(|e| SearchError::StorageError(format!("Failed to create writer: {e}")))?;

        for (ord, block) in blocks.iter().enumerate() {
            let mut document = doc!(
                fields.title => block.title.as_str(),
                fields.content => block.content.as_str(),
                fields.id => block.id.as_str(),
                fields.section => block.section.as_str(),
                fields.section_title => block.section_title.as_str(),
                fields.anchor => block.anchor.as_str(),
                fields.kind => block.kind.as_str(),
                fields.is_drawer => block.is_drawer(),
                fields.ord => ord as u64,
            );
            if let Some(subsection) = &block.subsection {
                document.add_text(fields.subsection, subsection);
            }
            if let Some(subsection_title) = &block.subsection_title {
                document.add_text(fields.subsection_title, subsection_title);
            }

            writer
                .add_document(document)
                .map_err(|e| SearchError::StorageError(format!("Failed to add document: {e}")))?;
        }

        writer
            .commit()
            .map_err(|e| SearchError::StorageError(format!("Failed to commit: {e}")))?;
        writer
            .wait_merging_threads()
            .map_err(|e| SearchError::StorageError(format!("Failed to finish merges: {e}")))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| SearchError::StorageError(format!("Failed to create reader: {e}")))?;

        Ok(Self {
            index,
            fields,
            reader,
            num_blocks: blocks.len(),
        })
    }

    /// Get a searcher over the committed blocks
    pub fn searcher(&self) -> Searcher {
        self.reader.searcher()
    }

    pub fn fields(&self) -> &BlockFields {
        &self.fields
    }

    /// Get a reference to the underlying Tantivy index
    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    /// Rebuild a block from its stored fields
    pub fn stored_block(&self, searcher: &Searcher, address: DocAddress) -> Result<(u64, Block)> {
        let doc: TantivyDocument = searcher.doc(address).map_err(|e| {
            SearchError::SearchFailed(format!("Failed to retrieve document: {e}"))
        })?;
        let f = &self.fields;

        let is_drawer = doc
            .get_first(f.is_drawer)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let kind = Self::extract_text(&doc, f.kind)
            .as_deref()
            .and_then(BlockKind::parse)
            .unwrap_or(if is_drawer {
                BlockKind::Drawer
            } else {
                BlockKind::Heading
            });
        let ord = doc.get_first(f.ord).and_then(|v| v.as_u64()).unwrap_or(0);

        let block = Block {
            id: Self::extract_text(&doc, f.id).unwrap_or_default(),
            section: Self::extract_text(&doc, f.section).unwrap_or_default(),
            section_title: Self::extract_text(&doc, f.section_title).unwrap_or_default(),
            subsection: Self::extract_text(&doc, f.subsection),
            subsection_title: Self::extract_text(&doc, f.subsection_title),
            anchor: Self::extract_text(&doc, f.anchor).unwrap_or_default(),
            title: Self::extract_text(&doc, f.title).unwrap_or_default(),
            content: Self::extract_text(&doc, f.content).unwrap_or_default(),
            kind,
        };

        Ok((ord, block))
    }

    /// Every stored block, in insertion order
    pub fn all_blocks(&self) -> Result<Vec<Block>> {
        let searcher = self.searcher();
        let mut blocks = Vec::with_capacity(self.num_blocks);

        for (segment_ord, segment_reader) in searcher.segment_readers().iter().enumerate() {
            for doc_id in segment_reader.doc_ids_alive() {
                let address = DocAddress::new(segment_ord as u32, doc_id);
                blocks.push(self.stored_block(&searcher, address)?);
            }
        }

        blocks.sort_by_key(|(ord, _)| *ord);
        Ok(blocks.into_iter().map(|(_, block)| block).collect())
    }

    /// Extract text field from document
    fn extract_text(doc: &TantivyDocument, field: Field) -> Option<String> {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

//! Storage layer for the block index.
//!
//! # Architecture
//!
//! - **BlockIndex**: in-memory Tantivy index over extracted blocks
//! - **IndexSnapshot**: JSON export used to hydrate an index later
//!
//! The index is built wholesale and never updated in place; a changed
//! corpus means building (or loading) a new index.

mod snapshot;
mod tantivy;

pub use snapshot::{IndexSnapshot, SNAPSHOT_FORMAT_VERSION};
pub use self::tantivy::{create_schema, BlockFields, BlockIndex};

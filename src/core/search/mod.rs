//! Search module for highlighted full-text search.
//!
//! Recall comes from Tantivy's BM25 ranking over block titles and
//! content; precision from a literal, case-insensitive match of the
//! whole query.

mod engine;
mod query;

pub use engine::SearchIndex;
pub use query::{build_field_query, query_terms, Highlighter};

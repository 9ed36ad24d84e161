//! Query construction and snippet highlighting.
//!
//! Query text never reaches a parser: it is tokenized with the same
//! analyzer the fields use and turned into term queries, so operators
//! and regex metacharacters in user input have no special meaning.
//! The precision filter and the highlighter match the whole query
//! literally and case-insensitively.

use crate::core::error::{Result, SearchError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};
use tantivy::query::{BooleanQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{Field, IndexRecordOption};
use tantivy::tokenizer::TokenStream;
use tantivy::{Index, Term};

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// Lowercased query terms as produced by the field's tokenizer
pub fn query_terms(index: &Index, field: Field, query: &str) -> Result<Vec<String>> {
    let mut analyzer = index
        .tokenizer_for_field(field)
        .map_err(|e| SearchError::SearchFailed(format!("Missing tokenizer: {e}")))?;

    let mut terms: Vec<String> = Vec::new();
    let mut stream = analyzer.token_stream(query);
    while stream.advance() {
        let text = &stream.token().text;
        if !terms.iter().any(|t| t == text) {
            terms.push(text.clone());
        }
    }
    Ok(terms)
}

/// Build a recall-oriented query: every term must occur, either
/// exactly (scored with BM25) or as a word prefix.
pub fn build_field_query(field: Field, terms: &[String]) -> Result<Box<dyn Query>> {
    let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::with_capacity(terms.len());

    for term in terms {
        let exact = TermQuery::new(
            Term::from_field_text(field, term),
            IndexRecordOption::WithFreqs,
        );
        let prefix = RegexQuery::from_pattern(&format!("{}.*", regex::escape(term)), field)
            .map_err(|e| SearchError::SearchFailed(format!("Failed to build prefix query: {e}")))?;

        let either: Vec<(Occur, Box<dyn Query>)> = vec![
            (Occur::Should, Box::new(exact) as Box<dyn Query>),
            (Occur::Should, Box::new(prefix) as Box<dyn Query>),
        ];
        clauses.push((Occur::Must, Box::new(BooleanQuery::new(either)) as Box<dyn Query>));
    }

    Ok(Box::new(BooleanQuery::new(clauses)))
}

/// Literal, case-insensitive matcher that wraps matches in a tag
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Regex,
    open: String,
    close: String,
}

impl Highlighter {
    /// Create a highlighter for `query`.
    ///
    /// The query is escaped before it is compiled, so `C++ (intro)`
    /// only matches itself.
    pub fn new(query: &str, tag: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::InvalidQuery(format!("Query cannot be matched: {e}")))?;

        Ok(Self {
            pattern,
            open: format!("<{tag}>"),
            close: format!("</{tag}>"),
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Wrap every occurrence of the query in the highlight tag
    pub fn highlight(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                format!("{}{}{}", self.open, &caps[0], self.close)
            })
            .into_owned()
    }

    pub fn has_marker(&self, snippet: &str) -> bool {
        snippet.contains(&self.open)
    }

    /// Highlight the paragraphs of `text` that contain the query.
    ///
    /// Falls back to highlighting the whole text when no single
    /// paragraph matches (e.g. a query spanning a paragraph break).
    pub fn paragraph_snippets(&self, text: &str) -> Vec<String> {
        let paragraphs: Vec<String> = PARAGRAPH_BREAK
            .split(text)
            .filter(|p| self.is_match(p))
            .map(|p| self.highlight(p))
            .collect();

        if paragraphs.is_empty() {
            vec![self.highlight(text)]
        } else {
            paragraphs
        }
    }
}

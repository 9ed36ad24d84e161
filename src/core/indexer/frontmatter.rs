//! Frontmatter parsing.
//!
//! A document may open with a block of `key: value` lines fenced by
//! `---` marker lines. Parsing is permissive: malformed lines are
//! skipped and nothing here ever fails.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DELIMITER: &str = "---";

/// A coerced frontmatter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl FrontmatterValue {
    /// Coerce a raw value: booleans, then numbers, else the trimmed string
    fn coerce(raw: &str) -> Self {
        let value = raw.trim();
        match value {
            "true" => return FrontmatterValue::Bool(true),
            "false" => return FrontmatterValue::Bool(false),
            _ => {}
        }

        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => FrontmatterValue::Number(n),
            _ => FrontmatterValue::String(value.to_string()),
        }
    }
}

/// Parsed frontmatter entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    entries: BTreeMap<String, FrontmatterValue>,
}

impl Frontmatter {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries.get(key)
    }

    /// String value; numbers and booleans are rendered back to text
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| match v {
            FrontmatterValue::String(s) => s.clone(),
            FrontmatterValue::Number(n) => n.to_string(),
            FrontmatterValue::Bool(b) => b.to_string(),
        })
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(FrontmatterValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        match self.entries.get(key) {
            Some(FrontmatterValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn into_map(self) -> BTreeMap<String, FrontmatterValue> {
        self.entries
    }
}

/// A document split into frontmatter and body
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub content: String,
    pub frontmatter: Frontmatter,
}

/// Split a raw document into its frontmatter and body.
///
/// The opening delimiter must be the very first line. Without a
/// closing delimiter the input is returned unchanged.
pub fn parse_frontmatter(raw: &str) -> ParsedDocument {
    let unchanged = || ParsedDocument {
        content: raw.to_string(),
        frontmatter: Frontmatter::default(),
    };

    let Some(after_open) = strip_delimiter_line(raw) else {
        return unchanged();
    };

    // Find the closing delimiter line
    let mut offset = 0;
    let mut close = None;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            close = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }

    let Some((block_end, body_start)) = close else {
        return unchanged();
    };

    let mut entries = BTreeMap::new();
    for line in after_open[..block_end].lines() {
        if line.trim().is_empty() {
            continue;
        }
        // Only the first colon separates key from value
        let Some((key, value)) = line.split_once(':') else {
            tracing::debug!("Ignoring frontmatter line without a colon: {:?}", line);
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        entries.insert(key.to_string(), FrontmatterValue::coerce(value));
    }

    ParsedDocument {
        content: after_open[body_start..].to_string(),
        frontmatter: Frontmatter { entries },
    }
}

/// Return the text after a leading `---` line, if present
fn strip_delimiter_line(raw: &str) -> Option<&str> {
    let rest = raw.strip_prefix(DELIMITER)?;
    rest.strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
}

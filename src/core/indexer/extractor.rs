//! Heading block extraction.
//!
//! Splits a document body into indexable blocks:
//!
//! - an intro block for text preceding the first `## ` heading
//! - one block per `## ` heading region
//! - one drawer block per `key:` entry under the drawer sentinel
//!   heading (`## All Sidebar Content Below`)
//!
//! Scanning is line-oriented. The current block accumulator is an
//! explicit [`ScanState`] so each heading line is a state transition.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::indexer::normalizer::normalize;
use crate::core::types::{Block, BlockKind};

/// Heading text that marks the drawer entries of a document
pub const DRAWER_SENTINEL: &str = "All Sidebar Content Below";

/// Section id whose titles are presented as "About"
pub const ABOUT_SECTION: &str = "about";

const ABOUT_LABEL: &str = "About";
const INTRO_ANCHOR: &str = "intro";
const INTRO_TITLE: &str = "Introduction";
const HEADING_PREFIX: &str = "## ";
const DRAWER_HEADING_PREFIX: &str = "Heading:";

/// Leading lines of intro text that repeat the page title
const INTRO_SKIP_LINES: usize = 2;

/// Words kept when deriving a drawer title from its body
const DERIVED_TITLE_WORDS: usize = 5;

static DRAWER_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([\w-]+):\s*$").unwrap());

/// Where a document sits in the handbook tree
#[derive(Debug, Clone)]
pub struct DocumentScope {
    pub section: String,
    pub section_title: String,
    pub subsection: Option<String>,
    pub subsection_title: Option<String>,
}

impl DocumentScope {
    pub fn section(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            section: id.into(),
            section_title: title.into(),
            subsection: None,
            subsection_title: None,
        }
    }

    pub fn subsection(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.subsection = Some(id.into());
        self.subsection_title = Some(title.into());
        self
    }

    /// `section[/subsection]#anchor`
    pub fn block_id(&self, anchor: &str) -> String {
        match &self.subsection {
            Some(sub) => format!("{}/{}#{}", self.section, sub, anchor),
            None => format!("{}#{}", self.section, anchor),
        }
    }

    fn block(&self, kind: BlockKind, anchor: String, title: String, content: String) -> Block {
        let about = self.section == ABOUT_SECTION;
        let section_title = if about {
            ABOUT_LABEL.to_string()
        } else {
            self.section_title.clone()
        };
        let subsection_title = if about {
            self.subsection_title.as_ref().map(|_| ABOUT_LABEL.to_string())
        } else {
            self.subsection_title.clone()
        };

        Block {
            id: self.block_id(&anchor),
            section: self.section.clone(),
            section_title,
            subsection: self.subsection.clone(),
            subsection_title,
            anchor,
            title,
            content,
            kind,
        }
    }
}

/// Derive a URL-safe anchor from heading text.
///
/// Lowercases, drops everything except alphanumerics, whitespace and
/// hyphens, then joins whitespace-separated words with single hyphens.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Anchor for the `ordinal`-th heading (1-based); `section-N` when the
/// heading text has nothing to slugify
fn heading_anchor(heading: &str, ordinal: usize) -> String {
    let slug = slugify(heading);
    if slug.is_empty() {
        format!("section-{ordinal}")
    } else {
        slug
    }
}

/// Drawer anchors keep the bare identifier so `key_name` links resolve
fn drawer_anchor(key: &str) -> String {
    key.to_lowercase()
}

/// Scanner state: which kind of region the current lines belong to
enum ScanState<'a> {
    NoBlock,
    InHeadingBlock { heading: &'a str, ordinal: usize },
    InDrawerSentinelBlock,
}

/// Ordered block list where a repeated id replaces the earlier block
#[derive(Default)]
struct BlockList {
    blocks: Vec<Block>,
}

impl BlockList {
    fn push(&mut self, block: Block) {
        if let Some(existing) = self.blocks.iter_mut().find(|b| b.id == block.id) {
            tracing::debug!("Duplicate block id {}, keeping the later block", block.id);
            *existing = block;
        } else {
            self.blocks.push(block);
        }
    }
}

/// Extract every block from a document body
pub fn extract_blocks(body: &str, scope: &DocumentScope) -> Vec<Block> {
    let mut out = BlockList::default();
    let mut state = ScanState::NoBlock;
    let mut lines: Vec<&str> = Vec::new();
    let mut headings = 0;

    for line in body.lines() {
        if let Some(heading) = line.strip_prefix(HEADING_PREFIX) {
            flush(&state, &lines, scope, &mut out);
            lines.clear();

            let heading = heading.trim();
            state = if heading == DRAWER_SENTINEL {
                ScanState::InDrawerSentinelBlock
            } else {
                headings += 1;
                ScanState::InHeadingBlock {
                    heading,
                    ordinal: headings,
                }
            };
        } else {
            lines.push(line);
        }
    }
    flush(&state, &lines, scope, &mut out);

    out.blocks
}

/// Emit the blocks for the region that just ended
fn flush(state: &ScanState<'_>, lines: &[&str], scope: &DocumentScope, out: &mut BlockList) {
    match state {
        ScanState::NoBlock => {
            let content = lines
                .iter()
                .skip(INTRO_SKIP_LINES)
                .copied()
                .collect::<Vec<_>>()
                .join("\n");
            let content = content.trim();
            if !content.is_empty() {
                out.push(scope.block(
                    BlockKind::Intro,
                    INTRO_ANCHOR.to_string(),
                    INTRO_TITLE.to_string(),
                    content.to_string(),
                ));
            }
        }
        ScanState::InHeadingBlock { heading, ordinal } => {
            out.push(scope.block(
                BlockKind::Heading,
                heading_anchor(heading, *ordinal),
                heading.to_string(),
                lines.join("\n").trim().to_string(),
            ));
        }
        ScanState::InDrawerSentinelBlock => {
            for entry in parse_drawer_entries(lines) {
                out.push(scope.block(
                    BlockKind::Drawer,
                    drawer_anchor(entry.key),
                    entry.title(),
                    entry.content(),
                ));
            }
        }
    }
}

/// One `key:` entry under the drawer sentinel heading
struct DrawerEntry<'a> {
    key: &'a str,
    heading: Option<&'a str>,
    lines: Vec<&'a str>,
}

impl DrawerEntry<'_> {
    fn content(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }

    /// Explicit heading, else a short label from the first body line
    fn title(&self) -> String {
        if let Some(heading) = self.heading {
            return heading.to_string();
        }

        let first_line = self
            .lines
            .iter()
            .find(|l| !l.trim().is_empty())
            .copied()
            .unwrap_or(self.key);
        let plain = normalize(first_line);
        let words: Vec<&str> = plain.split_whitespace().collect();
        if words.len() > DERIVED_TITLE_WORDS {
            format!("{}...", words[..DERIVED_TITLE_WORDS].join(" "))
        } else {
            words.join(" ")
        }
    }
}

fn parse_drawer_entries<'a>(lines: &[&'a str]) -> Vec<DrawerEntry<'a>> {
    let mut entries: Vec<DrawerEntry<'a>> = Vec::new();
    let mut just_opened = false;

    for &line in lines {
        if just_opened {
            just_opened = false;
            if let Some(heading) = line.trim_start().strip_prefix(DRAWER_HEADING_PREFIX) {
                if let Some(entry) = entries.last_mut() {
                    entry.heading = Some(heading.trim());
                }
                continue;
            }
        }

        if let Some(caps) = DRAWER_KEY.captures(line.trim_end()) {
            let key = caps.get(1).map_or("", |m| m.as_str());
            entries.push(DrawerEntry {
                key,
                heading: None,
                lines: Vec::new(),
            });
            just_opened = true;
            continue;
        }

        // Text before the first key line belongs to no entry
        if let Some(entry) = entries.last_mut() {
            entry.lines.push(line);
        }
    }

    entries
}

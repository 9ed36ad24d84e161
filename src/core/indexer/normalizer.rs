//! Markdown to plain text normalization.
//!
//! Produces clean searchable text and human-readable snippets by
//! stripping markdown syntax while keeping the visible text.
//!
//! Every rule removes characters and never adds any, so the rule set
//! is applied until the text stops changing. The result is therefore
//! idempotent: `normalize(normalize(t)) == normalize(t)`.

use once_cell::sync::Lazy;
use regex::Regex;

// Regex patterns compiled once at startup
static FRONTMATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A---\r?\n(?s:.*?)\r?\n---[ \t]*(?:\r?\n|\z)").unwrap());

static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]\n]*\]\([^)\n]*\)").unwrap());

static FOOTNOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\^[^\]\n]+\]").unwrap());

static DRAWER_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}\n]+)\}").unwrap());

static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]\n]+)\]\([^)\n]*\)").unwrap());

static BOLD_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());

static BOLD_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"__([^_\n]+)__").unwrap());

static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());

// Word boundaries keep snake_case identifiers intact
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b_([^_\n]+)_\b").unwrap());

static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

static HEADING_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}[ \t]+").unwrap());

static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

static NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip markdown syntax from `text`
pub fn normalize(text: &str) -> String {
    let mut current = text.replace("\r\n", "\n");
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

/// One application of every rule, in order
fn normalize_pass(text: &str) -> String {
    let text = FRONTMATTER.replace(text, "");
    let text = IMAGE.replace_all(&text, "");
    let text = FOOTNOTE.replace_all(&text, "");
    let text = DRAWER_REF.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = BOLD_STARS.replace_all(&text, "$1");
    let text = BOLD_UNDERSCORES.replace_all(&text, "$1");
    let text = ITALIC_STAR.replace_all(&text, "$1");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = HEADING_MARKER.replace_all(&text, "");
    let text = SPACES.replace_all(&text, " ");
    let text = NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

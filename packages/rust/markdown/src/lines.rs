//! Line classifier for loosely structured lesson documents.
//!
//! Every line maps to exactly one [`Line`] tag. The classifier is pure and
//! total: it never fails and never looks at neighbouring lines.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `#` … `######` followed by a space.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6}) (.*)$").expect("heading regex"));

/// A single classified line. Payloads borrow from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `# Title` through `###### Title`.
    Heading { level: u8, text: &'a str },
    /// `- item` or `* item`.
    Bullet(&'a str),
    /// Any other non-empty line.
    Text(&'a str),
    /// Empty or whitespace-only.
    Blank,
}

impl<'a> Line<'a> {
    /// Heading text if this is a heading at exactly `level`.
    pub fn heading_at(&self, level: u8) -> Option<&'a str> {
        match *self {
            Line::Heading { level: l, text } if l == level => Some(text),
            _ => None,
        }
    }
}

/// Classify one line of raw text.
pub fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }

    if let Some(caps) = HEADING_RE.captures(line) {
        let level = caps[1].len() as u8;
        let text = caps.get(2).map_or("", |m| m.as_str().trim());
        return Line::Heading { level, text };
    }

    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Line::Bullet(rest.trim());
    }

    Line::Text(line.trim())
}

/// Classify every line of a document, in order.
pub fn classify_document(text: &str) -> Vec<Line<'_>> {
    text.lines().map(classify).collect()
}

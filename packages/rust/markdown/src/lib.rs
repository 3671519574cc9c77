//! Line classification and section extraction for lesson documents.
//!
//! Raw Markdown is never rendered here. Each line is tagged by
//! [`lines::classify`], then [`sections::extract_sections`] folds the tags into
//! the title, description and lists that make up a module.

pub mod lines;
pub mod sections;

pub use lines::{Line, classify, classify_document};
pub use sections::{
    DEFAULT_DESCRIPTION, ExtractedSections, OBJECTIVES_HEADING, PREREQUISITES_HEADING,
    ParserState, extract_sections,
};

/// Classify and extract in one step.
pub fn extract_document(text: &str, fallback_title: &str) -> ExtractedSections {
    extract_sections(&classify_document(text), fallback_title)
}

/// First text line under a level-2 `heading`, if any.
///
/// Used for phase READMEs, whose `## Overview` paragraph becomes the phase
/// description.
pub fn first_line_under(document: &str, heading: &str) -> Option<String> {
    let mut inside = false;
    for line in classify_document(document) {
        match line {
            Line::Heading { level: 2, text } => inside = text == heading,
            Line::Heading { .. } if inside => return None,
            Line::Text(text) if inside => return Some(text.to_string()),
            _ => {}
        }
    }
    None
}

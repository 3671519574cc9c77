//! Section extractor: folds classified lines into module metadata.
//!
//! A single left-to-right pass drives a three-state parser
//! ([`ParserState`]). Every field falls back independently when the document
//! lacks the structure it is drawn from, so extraction never fails.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::lines::Line;

/// Heading that switches the parser into objective collection.
pub const OBJECTIVES_HEADING: &str = "Learning Objectives";

/// Heading that switches the parser into prerequisite collection.
pub const PREREQUISITES_HEADING: &str = "Prerequisites";

/// Description used when a document has no usable paragraph.
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// Single-line descriptions are cut to this many characters.
const DESCRIPTION_MAX_CHARS: usize = 200;

/// `**Label**: rest` or `**Label:** rest`.
static TOPIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*(?:([^*]+?):\*\*|([^*]+?)\*\*\s*:)").expect("topic regex")
});

/// A line that opens with a bold phrase.
static BOLD_LEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*[^*]+\*\*").expect("bold lead regex"));

/// Leading `**Project...**:` style marker.
static PROJECT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\*\*[^*]*project[^*]*\*\*\s*:?\s*").expect("project marker regex")
});

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which list, if any, bullets are currently appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    #[default]
    Idle,
    CollectingObjectives,
    CollectingPrerequisites,
}

impl ParserState {
    /// State after entering a level-2 heading with `text`.
    pub fn on_section(text: &str) -> Self {
        match text {
            OBJECTIVES_HEADING => Self::CollectingObjectives,
            PREREQUISITES_HEADING => Self::CollectingPrerequisites,
            _ => Self::Idle,
        }
    }
}

/// Metadata extracted from one lesson document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSections {
    pub title: String,
    pub description: String,
    pub learning_objectives: Vec<String>,
    pub prerequisites: Vec<String>,
    pub sections: Vec<String>,
    pub topics: Vec<String>,
    pub projects: Vec<String>,
}

/// First contiguous run of text lines, closed by any other line.
#[derive(Debug, Default)]
struct TextRun<'a> {
    lines: Vec<&'a str>,
    closed: bool,
}

impl<'a> TextRun<'a> {
    fn feed(&mut self, line: &Line<'a>) {
        if self.closed {
            return;
        }
        match line {
            Line::Text(text) => self.lines.push(*text),
            _ if !self.lines.is_empty() => self.closed = true,
            _ => {}
        }
    }

    fn into_description(self) -> Option<String> {
        match self.lines.as_slice() {
            [] => None,
            [only] => Some(only.chars().take(DESCRIPTION_MAX_CHARS).collect()),
            [first, ..] => Some((*first).to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Extract module metadata from classified lines.
///
/// `fallback_title` is used when the document has no level-1 heading;
/// callers pass the filename stem.
pub fn extract_sections(lines: &[Line<'_>], fallback_title: &str) -> ExtractedSections {
    let mut state = ParserState::Idle;
    let mut title: Option<&str> = None;
    let mut seen_section = false;

    // Runs before and after the title; which one wins depends on whether a
    // title turns up at all.
    let mut leading_run = TextRun::default();
    let mut titled_run = TextRun::default();

    let mut learning_objectives = Vec::new();
    let mut prerequisites = Vec::new();
    let mut sections = Vec::new();
    let mut topics = Vec::new();
    let mut projects = Vec::new();

    for line in lines {
        if !seen_section {
            if title.is_some() {
                titled_run.feed(line);
            } else {
                leading_run.feed(line);
            }
        }

        match *line {
            Line::Heading { level: 1, text } if title.is_none() => {
                title = Some(text);
            }
            Line::Heading { level: 2, text } => {
                seen_section = true;
                state = ParserState::on_section(text);
                trace!(section = text, ?state, "entered section");
                sections.push(text.to_string());
            }
            Line::Heading { .. } | Line::Blank => {}
            Line::Bullet(text) => {
                match state {
                    ParserState::CollectingObjectives => learning_objectives.push(text.to_string()),
                    ParserState::CollectingPrerequisites => prerequisites.push(text.to_string()),
                    ParserState::Idle => {}
                }
                if let Some(label) = topic_label(text) {
                    topics.push(label);
                }
                if let Some(project) = project_text(text) {
                    projects.push(project);
                }
            }
            Line::Text(text) => {
                if BOLD_LEAD_RE.is_match(text) {
                    if let Some(project) = project_text(text) {
                        projects.push(project);
                    }
                }
            }
        }
    }

    let description = if title.is_some() {
        titled_run.into_description()
    } else {
        leading_run.into_description()
    };

    if topics.is_empty() {
        topics = sections.clone();
    }

    ExtractedSections {
        title: title.unwrap_or(fallback_title).to_string(),
        description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        learning_objectives,
        prerequisites,
        sections,
        topics,
        projects,
    }
}

/// Label of a `**Label**: rest` line.
fn topic_label(text: &str) -> Option<String> {
    let caps = TOPIC_RE.captures(text)?;
    let label = caps.get(1).or_else(|| caps.get(2))?.as_str().trim();
    (!label.is_empty()).then(|| label.to_string())
}

/// Project description with any leading bold marker removed.
fn project_text(text: &str) -> Option<String> {
    if !text.to_lowercase().contains("project") {
        return None;
    }
    let stripped = PROJECT_MARKER_RE.replace(text, "");
    let stripped = stripped.trim();
    (!stripped.is_empty()).then(|| stripped.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::classify_document;

    fn extract(doc: &str) -> ExtractedSections {
        extract_sections(&classify_document(doc), "Fallback Title")
    }

    #[test]
    fn objectives_and_prerequisites() {
        let out = extract("## Learning Objectives\n- A\n- B\n## Prerequisites\n- C");
        assert_eq!(out.learning_objectives, vec!["A", "B"]);
        assert_eq!(out.prerequisites, vec!["C"]);
        assert_eq!(out.sections, vec!["Learning Objectives", "Prerequisites"]);
    }

    #[test]
    fn missing_objectives_heading_yields_empty_list() {
        let out = extract("# Title\n\nIntro.\n\n## Overview\n- not an objective\n");
        assert!(out.learning_objectives.is_empty());
        assert!(out.prerequisites.is_empty());
    }

    #[test]
    fn other_section_resets_to_idle() {
        let doc = "\
## Learning Objectives
- Learn flexbox
## Content
- Idle bullet
### Sub heading keeps state
- Still idle
## Prerequisites
- HTML basics
";
        let out = extract(doc);
        assert_eq!(out.learning_objectives, vec!["Learn flexbox"]);
        assert_eq!(out.prerequisites, vec!["HTML basics"]);
    }

    #[test]
    fn level_three_heading_does_not_change_state() {
        let doc = "## Learning Objectives\n### Core\n- One\n### Stretch\n- Two\n";
        let out = extract(doc);
        assert_eq!(out.learning_objectives, vec!["One", "Two"]);
        assert_eq!(out.sections, vec!["Learning Objectives"]);
    }

    #[test]
    fn title_from_first_h1() {
        let out = extract("# First\n# Second\n");
        assert_eq!(out.title, "First");
    }

    #[test]
    fn title_falls_back() {
        let out = extract("Just prose.\n");
        assert_eq!(out.title, "Fallback Title");
    }

    #[test]
    fn description_is_first_line_of_run() {
        let doc = "# Title\n\nLine one.\nLine two.\n\nLater paragraph.\n## Section\n";
        assert_eq!(extract(doc).description, "Line one.");
    }

    #[test]
    fn single_line_description_is_truncated() {
        let long = "x".repeat(250);
        let doc = format!("# Title\n\n{long}\n");
        let out = extract(&doc);
        assert_eq!(out.description.chars().count(), 200);
    }

    #[test]
    fn description_ignores_text_before_title() {
        let doc = "Badge line\n# Title\n\nReal description.\n";
        assert_eq!(extract(doc).description, "Real description.");
    }

    #[test]
    fn description_without_title_uses_leading_run() {
        let doc = "Orphan paragraph.\n\n## Section\n";
        assert_eq!(extract(doc).description, "Orphan paragraph.");
    }

    #[test]
    fn description_stops_at_first_section() {
        let doc = "# Title\n## Section\nToo late.\n";
        assert_eq!(extract(doc).description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn description_run_ends_at_bullet() {
        let doc = "# Title\n- a bullet first\nProse after.\n";
        assert_eq!(extract(doc).description, "Prose after.");
    }

    #[test]
    fn topics_from_bold_labels() {
        let doc = "\
## Content
- **Flexbox**: one-dimensional layout
- **Grid:** two-dimensional layout
- plain bullet
";
        let out = extract(doc);
        assert_eq!(out.topics, vec!["Flexbox", "Grid"]);
    }

    #[test]
    fn topics_fall_back_to_sections() {
        let out = extract("## Intro\n- a\n## Practice\n- b\n");
        assert_eq!(out.topics, vec!["Intro", "Practice"]);
    }

    #[test]
    fn projects_strip_marker() {
        let doc = "\
## Practice
- **Project**: Build a portfolio site
- **Mini Project:** Todo list
**Capstone Project**: Ship it
- Read about project structure
- Unrelated bullet
Plain text about a project
";
        let out = extract(doc);
        assert_eq!(
            out.projects,
            vec![
                "Build a portfolio site",
                "Todo list",
                "Ship it",
                "Read about project structure",
            ]
        );
    }

    #[test]
    fn bare_project_marker_is_dropped() {
        let out = extract("- **Projects**\n");
        assert!(out.projects.is_empty());
    }

    #[test]
    fn unterminated_fence_does_not_hide_sections() {
        let doc = "\
# Title

Use ```js blocks like this.
```js
console.log(1)

## Learning Objectives
- A
- B
## Prerequisites
- C
";
        let out = extract(doc);
        assert_eq!(out.learning_objectives, vec!["A", "B"]);
        assert_eq!(out.prerequisites, vec!["C"]);
        assert_eq!(out.sections, vec!["Learning Objectives", "Prerequisites"]);
    }

    #[test]
    fn fence_marker_is_plain_text() {
        let out = extract("## Learning Objectives\n- A\n```\n## Prerequisites\n- C\n");
        assert_eq!(out.learning_objectives, vec!["A"]);
        assert_eq!(out.prerequisites, vec!["C"]);
        assert_eq!(out.sections, vec!["Learning Objectives", "Prerequisites"]);
    }

    #[test]
    fn lines_inside_code_blocks_are_classified_like_any_other() {
        let doc = "\
# Setup

```bash
# later h1 is not the title
- bullet outside any list section
```

## Learning Objectives
- Use a terminal
";
        let out = extract(doc);
        assert_eq!(out.title, "Setup");
        assert_eq!(out.learning_objectives, vec!["Use a terminal"]);
        assert_eq!(out.sections, vec!["Learning Objectives"]);
    }

    #[test]
    fn empty_document_uses_all_fallbacks() {
        let out = extract("");
        assert_eq!(out.title, "Fallback Title");
        assert_eq!(out.description, DEFAULT_DESCRIPTION);
        assert!(out.sections.is_empty());
        assert!(out.topics.is_empty());
        assert!(out.projects.is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let doc = "# T\n\nD.\n## Learning Objectives\n- **A**: x\n- Project work\n";
        assert_eq!(extract(doc), extract(doc));
    }

    #[test]
    fn state_transitions() {
        assert_eq!(
            ParserState::on_section("Learning Objectives"),
            ParserState::CollectingObjectives
        );
        assert_eq!(
            ParserState::on_section("Prerequisites"),
            ParserState::CollectingPrerequisites
        );
        assert_eq!(ParserState::on_section("learning objectives"), ParserState::Idle);
    }
}

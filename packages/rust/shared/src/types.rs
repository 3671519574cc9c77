//! Core domain types for the curriculum model.
//!
//! The tree is built once per scan and never mutated afterwards. Field names
//! serialize as camelCase so a rendering layer can consume the JSON directly.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Coarse difficulty label inferred from a document's phase location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Module
// ---------------------------------------------------------------------------

/// One parsed lesson document within a phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Slug computed from the source filename; unique within its phase.
    pub id: String,
    /// First H1 of the document, or the filename stem.
    pub title: String,
    /// Short description taken from the first paragraph.
    pub description: String,
    /// Bullets under `## Learning Objectives`.
    pub learning_objectives: Vec<String>,
    /// Bullets under `## Prerequisites`.
    pub prerequisites: Vec<String>,
    /// Every H2 heading, in document order.
    pub sections: Vec<String>,
    /// Bold-labelled bullet labels, or the section list when there are none.
    pub topics: Vec<String>,
    /// Lines mentioning a project.
    pub projects: Vec<String>,
    pub difficulty: Difficulty,
    /// Source filename within the phase folder.
    pub filename: String,
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// A top-level grouping of modules, ordered canonically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// `phase-<index>` from the canonical position.
    pub id: String,
    /// Display title derived from the folder name.
    pub title: String,
    pub description: String,
    /// Palette token for the viewer.
    pub color: String,
    /// Source folder name under the curriculum root.
    pub folder: String,
    pub modules: Vec<Module>,
}

impl Phase {
    /// Look up a module by its slug.
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }
}

// ---------------------------------------------------------------------------
// CurriculumTree
// ---------------------------------------------------------------------------

/// Root of the structured curriculum model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumTree {
    pub title: String,
    pub description: String,
    pub phases: Vec<Phase>,
}

impl CurriculumTree {
    /// Look up a phase by its slug.
    pub fn phase(&self, id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Total number of modules across all phases.
    pub fn module_count(&self) -> usize {
        self.phases.iter().map(|p| p.modules.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_module(id: &str) -> Module {
        Module {
            id: id.into(),
            title: "Development Environment Setup".into(),
            description: "Get your tools ready.".into(),
            learning_objectives: vec!["Install an editor".into()],
            prerequisites: vec![],
            sections: vec!["Learning Objectives".into()],
            topics: vec!["Learning Objectives".into()],
            projects: vec![],
            difficulty: Difficulty::Beginner,
            filename: "Module-0.1-Development-Environment-Setup.md".into(),
        }
    }

    #[test]
    fn module_serializes_camel_case() {
        let json = serde_json::to_value(make_module("module-0-1-development-environment-setup"))
            .expect("serialize");
        assert!(json.get("learningObjectives").is_some());
        assert!(json.get("learning_objectives").is_none());
        assert_eq!(json["difficulty"], "Beginner");
    }

    #[test]
    fn tree_lookup_helpers() {
        let tree = CurriculumTree {
            title: "Course".into(),
            description: "All of it".into(),
            phases: vec![Phase {
                id: "phase-0".into(),
                title: "Phase 0: Foundations".into(),
                description: "Start here".into(),
                color: "blue".into(),
                folder: "Phase-0-Foundations".into(),
                modules: vec![make_module("module-0-1-a"), make_module("module-0-2-b")],
            }],
        };

        assert_eq!(tree.module_count(), 2);
        let phase = tree.phase("phase-0").expect("phase");
        assert!(phase.module("module-0-2-b").is_some());
        assert!(phase.module("module-9-9-z").is_none());
        assert!(tree.phase("phase-7").is_none());
    }

    #[test]
    fn tree_json_roundtrip() {
        let tree = CurriculumTree {
            title: "Course".into(),
            description: "All of it".into(),
            phases: vec![],
        };
        let json = serde_json::to_string(&tree).expect("serialize");
        let parsed: CurriculumTree = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, tree);
    }

    #[test]
    fn difficulty_display() {
        assert_eq!(Difficulty::Intermediate.to_string(), "Intermediate");
    }
}

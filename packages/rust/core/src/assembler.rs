//! Curriculum assembler.
//!
//! Takes the walker's ordered document list, parses each document, and groups
//! the resulting modules under their phases in canonical order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, instrument, trace, warn};

use syllabus_markdown::{extract_document, first_line_under};
use syllabus_shared::{CurriculumConfig, CurriculumTree, Module, Phase, Result, SyllabusError};

use crate::codec::{IdentifierCodec, strip_extension};
use crate::difficulty::infer_difficulty;
use crate::pipeline::ScanProgress;
use crate::walker::DocumentRef;

/// Optional per-phase document carrying the phase description.
pub const PHASE_README: &str = "README.md";

/// Heading in the phase README whose first line describes the phase.
pub const PHASE_OVERVIEW_HEADING: &str = "Overview";

/// Phase description used when the README is missing or has no overview.
pub const DEFAULT_PHASE_DESCRIPTION: &str = "Explore the modules in this phase.";

/// `Phase 3 Rest Of Title` after separators became spaces.
static PHASE_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Phase (\d+)(?: (.+))?$").expect("phase title regex"));

/// Output of an assembly pass.
#[derive(Debug, Clone)]
pub struct AssembleResult {
    pub tree: CurriculumTree,
    /// Documents that were listed but could not be turned into modules.
    pub skipped: Vec<SkippedDocument>,
}

/// A document left out of the tree, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

/// Build the curriculum tree from walker output.
///
/// Every declared phase appears in the result, in declared order, whether or
/// not its folder exists. Unreadable documents and slug collisions are logged
/// and reported in [`AssembleResult::skipped`]; neither aborts the pass.
#[instrument(skip_all, fields(root = %root.display(), documents = documents.len()))]
pub fn assemble(
    root: &Path,
    documents: &[DocumentRef],
    config: &CurriculumConfig,
    progress: &dyn ScanProgress,
) -> AssembleResult {
    let codec = IdentifierCodec::new(&config.codec);
    let mut skipped = Vec::new();
    let mut phases = Vec::with_capacity(config.phases.len());
    let mut parsed = 0usize;

    for (index, folder) in config.phases.iter().enumerate() {
        let mut phase = build_phase(root, index, folder, config);
        progress.phase_started(&phase.title, index + 1, config.phases.len());

        let mut ids: HashSet<String> = HashSet::new();
        for doc in documents.iter().filter(|d| d.phase_index == index) {
            parsed += 1;
            progress.module_parsed(&doc.filename, parsed, documents.len());

            let module = match build_module(doc, &codec, config) {
                Ok(module) => module,
                Err(e) => {
                    warn!(path = %doc.path.display(), error = %e, "skipping unreadable document");
                    skipped.push(SkippedDocument {
                        path: doc.path.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !ids.insert(module.id.clone()) {
                warn!(id = %module.id, path = %doc.path.display(), "duplicate module id, skipping");
                skipped.push(SkippedDocument {
                    path: doc.path.clone(),
                    reason: format!("duplicate module id {}", module.id),
                });
                continue;
            }

            phase.modules.push(module);
        }

        debug!(phase = %phase.id, modules = phase.modules.len(), "phase assembled");
        phases.push(phase);
    }

    let tree = CurriculumTree {
        title: config.title.clone(),
        description: config.description.clone(),
        phases,
    };

    info!(
        phases = tree.phases.len(),
        modules = tree.module_count(),
        skipped = skipped.len(),
        "curriculum assembled"
    );

    AssembleResult { tree, skipped }
}

/// Parse one document into a module.
pub fn build_module(
    doc: &DocumentRef,
    codec: &IdentifierCodec,
    config: &CurriculumConfig,
) -> Result<Module> {
    let text = std::fs::read_to_string(&doc.path).map_err(|e| SyllabusError::io(&doc.path, e))?;
    Ok(module_from_text(&text, doc, codec, config))
}

/// Build a module from already-loaded document text.
pub fn module_from_text(
    text: &str,
    doc: &DocumentRef,
    codec: &IdentifierCodec,
    config: &CurriculumConfig,
) -> Module {
    let id = codec.encode(&doc.filename);
    if !codec.round_trips(&doc.filename) {
        trace!(filename = %doc.filename, %id, "slug does not decode back to this exact filename");
    }

    let extracted = extract_document(text, strip_extension(&doc.filename));

    Module {
        id,
        title: extracted.title,
        description: extracted.description,
        learning_objectives: extracted.learning_objectives,
        prerequisites: extracted.prerequisites,
        sections: extracted.sections,
        topics: extracted.topics,
        projects: extracted.projects,
        difficulty: infer_difficulty(&doc.folder, &config.difficulty),
        filename: doc.filename.clone(),
    }
}

// ---------------------------------------------------------------------------
// Phase helpers
// ---------------------------------------------------------------------------

/// Phase shell (no modules yet) for the folder at canonical `index`.
fn build_phase(root: &Path, index: usize, folder: &str, config: &CurriculumConfig) -> Phase {
    Phase {
        id: phase_id(index),
        title: phase_title(folder),
        description: phase_description(&root.join(folder)),
        color: config.color_for(index).to_string(),
        folder: folder.to_string(),
        modules: Vec::new(),
    }
}

/// `phase-<index>`.
pub fn phase_id(index: usize) -> String {
    format!("phase-{index}")
}

/// Display title for a phase folder: `Phase-0-Foundations` → `Phase 0: Foundations`.
pub fn phase_title(folder: &str) -> String {
    let spaced = folder
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    match PHASE_TITLE_RE.captures(&spaced) {
        Some(caps) => match caps.get(2) {
            Some(rest) => format!("Phase {}: {}", &caps[1], rest.as_str()),
            None => format!("Phase {}", &caps[1]),
        },
        None => spaced,
    }
}

/// First line of the `## Overview` section in the phase README, if present.
fn phase_description(phase_dir: &Path) -> String {
    let readme = phase_dir.join(PHASE_README);
    let Ok(text) = std::fs::read_to_string(&readme) else {
        return DEFAULT_PHASE_DESCRIPTION.to_string();
    };
    first_line_under(&text, PHASE_OVERVIEW_HEADING)
        .unwrap_or_else(|| DEFAULT_PHASE_DESCRIPTION.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

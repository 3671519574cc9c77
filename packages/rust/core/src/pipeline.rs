//! End-to-end scan: curriculum root → walker → extractor → assembler → tree.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use syllabus_shared::{CurriculumConfig, CurriculumTree, Result};

use crate::assembler::{self, SkippedDocument};
use crate::walker;

/// Result of a scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// The assembled curriculum.
    pub tree: CurriculumTree,
    /// Number of documents the walker listed.
    pub document_count: usize,
    /// Documents left out of the tree.
    pub skipped: Vec<SkippedDocument>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting scan status.
pub trait ScanProgress: Send + Sync {
    /// Called when assembly moves on to a phase (`current` is 1-based).
    fn phase_started(&self, title: &str, current: usize, total: usize);
    /// Called for each document handed to the extractor.
    fn module_parsed(&self, filename: &str, current: usize, total: usize);
    /// Called when the scan completes.
    fn done(&self, result: &ScanResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ScanProgress for SilentProgress {
    fn phase_started(&self, _title: &str, _current: usize, _total: usize) {}
    fn module_parsed(&self, _filename: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &ScanResult) {}
}

/// Scan a curriculum root and build its tree.
///
/// 1. Walk declared phase folders in canonical order
/// 2. Extract sections and infer difficulty per document
/// 3. Group modules under phases
///
/// Fails only when `root` itself does not exist.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn scan(
    root: &Path,
    config: &CurriculumConfig,
    progress: &dyn ScanProgress,
) -> Result<ScanResult> {
    let start = Instant::now();

    let documents = walker::walk(root, &config.phases, &config.codec.overview_document)?;
    info!(documents = documents.len(), "documents discovered");

    let assembled = assembler::assemble(root, &documents, config, progress);

    let result = ScanResult {
        tree: assembled.tree,
        document_count: documents.len(),
        skipped: assembled.skipped,
        elapsed: start.elapsed(),
    };

    info!(
        modules = result.tree.module_count(),
        elapsed_ms = result.elapsed.as_millis() as u64,
        "scan complete"
    );
    progress.done(&result);

    Ok(result)
}

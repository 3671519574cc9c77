//! Directory walker: enumerate module documents in canonical phase order.
//!
//! Phase folders are visited in the order they are declared, never in
//! filesystem order. Folders that are missing are skipped, not errors.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, warn};

use syllabus_shared::{Result, SyllabusError};

/// `Module-<major>.<minor>-<Title>.md`.
static MODULE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Module-\d+\.\d+-.+\.md$").expect("module file regex"));

/// A module document paired with its phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Position of the phase in the canonical order.
    pub phase_index: usize,
    /// Phase folder name.
    pub folder: String,
    /// Document filename within the folder.
    pub filename: String,
    /// Full path on disk.
    pub path: PathBuf,
}

/// Whether `filename` follows the module naming convention or is the overview.
pub fn is_module_document(filename: &str, overview_document: &str) -> bool {
    filename == overview_document || MODULE_FILE_RE.is_match(filename)
}

/// Walk `root` and list module documents for each declared phase folder.
///
/// Output preserves canonical phase order, then lexical filename order within
/// each phase. Only a missing `root` is an error.
#[instrument(skip_all, fields(root = %root.display(), phases = phases.len()))]
pub fn walk(root: &Path, phases: &[String], overview_document: &str) -> Result<Vec<DocumentRef>> {
    if !root.is_dir() {
        return Err(SyllabusError::missing_directory(root));
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut documents = Vec::new();

    for (phase_index, folder) in phases.iter().enumerate() {
        if !visited.insert(folder.as_str()) {
            debug!(%folder, "phase folder already visited");
            continue;
        }

        let dir = root.join(folder);
        let filenames = match list_documents(&dir, overview_document) {
            Ok(filenames) => filenames,
            Err(e) if e.is_not_found() => {
                warn!(%folder, "phase folder missing, skipping");
                continue;
            }
            Err(e) => {
                warn!(%folder, error = %e, "cannot read phase folder, skipping");
                continue;
            }
        };

        debug!(%folder, count = filenames.len(), "phase folder listed");

        documents.extend(filenames.into_iter().map(|filename| DocumentRef {
            phase_index,
            folder: folder.clone(),
            path: dir.join(&filename),
            filename,
        }));
    }

    Ok(documents)
}

/// Lexically sorted module documents in one folder.
fn list_documents(dir: &Path, overview_document: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(SyllabusError::missing_directory(dir));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| SyllabusError::io(dir, e))?;

    let mut filenames = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SyllabusError::io(dir, e))?;
        if !entry.path().is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            debug!(path = %entry.path().display(), "skipping non-UTF-8 filename");
            continue;
        };
        if is_module_document(&name, overview_document) {
            filenames.push(name);
        }
    }

    filenames.sort();
    Ok(filenames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("syllabus-walker-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "# stub\n").unwrap();
    }

    fn phases(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn naming_convention() {
        assert!(is_module_document("Module-0.1-Setup.md", "Phase-Overview.md"));
        assert!(is_module_document("Module-10.12-Deep-Dive.md", "Phase-Overview.md"));
        assert!(is_module_document("Phase-Overview.md", "Phase-Overview.md"));
        assert!(!is_module_document("README.md", "Phase-Overview.md"));
        assert!(!is_module_document("Module-1-Setup.md", "Phase-Overview.md"));
        assert!(!is_module_document("Module-0.1-Setup.txt", "Phase-Overview.md"));
        assert!(!is_module_document("module-0.1-setup.md", "Phase-Overview.md"));
    }

    #[test]
    fn canonical_order_and_lexical_files() {
        let root = temp_dir();
        // Created in reverse so filesystem order cannot line up by accident.
        for folder in ["Phase-1-B", "Phase-0-A"] {
            std::fs::create_dir_all(root.join(folder)).unwrap();
        }
        touch(&root.join("Phase-1-B"), "Module-1.2-Second.md");
        touch(&root.join("Phase-1-B"), "Module-1.1-First.md");
        touch(&root.join("Phase-0-A"), "Module-0.1-Only.md");
        touch(&root.join("Phase-0-A"), "README.md");
        touch(&root.join("Phase-0-A"), "notes.txt");

        let docs = walk(&root, &phases(&["Phase-0-A", "Phase-1-B"]), "Phase-Overview.md").unwrap();
        let names: Vec<_> = docs.iter().map(|d| (d.phase_index, d.filename.as_str())).collect();
        assert_eq!(
            names,
            vec![
                (0, "Module-0.1-Only.md"),
                (1, "Module-1.1-First.md"),
                (1, "Module-1.2-Second.md"),
            ]
        );
        assert_eq!(docs[0].path, root.join("Phase-0-A").join("Module-0.1-Only.md"));

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn missing_folders_are_skipped() {
        let root = temp_dir();
        std::fs::create_dir_all(root.join("Phase-2-C")).unwrap();
        touch(&root.join("Phase-2-C"), "Module-2.1-X.md");

        let docs = walk(&root, &phases(&["Phase-0-A", "Phase-1-B", "Phase-2-C"]), "Phase-Overview.md")
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].phase_index, 2);

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn duplicate_folders_visited_once() {
        let root = temp_dir();
        std::fs::create_dir_all(root.join("Phase-0-A")).unwrap();
        touch(&root.join("Phase-0-A"), "Module-0.1-Only.md");

        let docs = walk(&root, &phases(&["Phase-0-A", "Phase-0-A"]), "Phase-Overview.md").unwrap();
        assert_eq!(docs.len(), 1);

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn directories_named_like_modules_are_ignored() {
        let root = temp_dir();
        std::fs::create_dir_all(root.join("Phase-0-A").join("Module-0.9-Assets.md")).unwrap();
        touch(&root.join("Phase-0-A"), "Phase-Overview.md");

        let docs = walk(&root, &phases(&["Phase-0-A"]), "Phase-Overview.md").unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename, "Phase-Overview.md");

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = std::env::temp_dir().join(format!("syllabus-absent-{}", uuid::Uuid::now_v7()));
        let err = walk(&root, &phases(&["Phase-0-A"]), "Phase-Overview.md").unwrap_err();
        assert!(matches!(err, SyllabusError::MissingDirectory { .. }));
    }
}

//! On-demand content retrieval for the module viewer.
//!
//! A viewer knows a module only by `(phase slug, module slug)`. The resolver
//! maps that pair back to a relative document path through the canonical
//! phase table and the identifier codec, then reads the raw text. A missing
//! document is an expected outcome, returned as [`ModuleContent::NotFound`]
//! with a placeholder the viewer can show in place of the lesson.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, instrument, warn};

use syllabus_shared::{CurriculumConfig, Result, SyllabusError};

use crate::codec::IdentifierCodec;

/// Outcome of fetching a module document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleContent {
    /// Raw Markdown of the document.
    Found { path: PathBuf, text: String },
    /// Nothing at the expected location.
    NotFound {
        expected_path: PathBuf,
        placeholder: String,
    },
}

impl ModuleContent {
    /// Text to display: the document itself or the placeholder.
    pub fn text(&self) -> &str {
        match self {
            Self::Found { text, .. } => text,
            Self::NotFound { placeholder, .. } => placeholder,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Resolves and fetches module documents under a curriculum root.
#[derive(Debug, Clone)]
pub struct ContentResolver {
    root: PathBuf,
    config: CurriculumConfig,
    codec: IdentifierCodec,
}

impl ContentResolver {
    pub fn new(root: impl Into<PathBuf>, config: &CurriculumConfig) -> Self {
        Self {
            root: root.into(),
            config: config.clone(),
            codec: IdentifierCodec::new(&config.codec),
        }
    }

    /// Relative document path for a `(phase slug, module slug)` pair.
    ///
    /// Returns `None` when the phase slug is not `phase-<index>` for a
    /// declared phase, or when the module slug would not name a file directly
    /// inside that phase folder.
    pub fn resolve(&self, phase_slug: &str, module_slug: &str) -> Option<PathBuf> {
        let folder = self.config.phase_folder(phase_slug)?;
        if module_slug.is_empty()
            || module_slug.contains(['/', '\\'])
            || module_slug.contains("..")
        {
            return None;
        }
        let filename = self.codec.decode(module_slug);
        is_plain_filename(&filename).then(|| Path::new(folder).join(filename))
    }

    /// Fetch the raw text of a module document.
    ///
    /// Missing documents and unknown phases yield [`ModuleContent::NotFound`];
    /// only unexpected I/O failures are errors.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn fetch(&self, phase_slug: &str, module_slug: &str) -> Result<ModuleContent> {
        let Some(relative) = self.resolve(phase_slug, module_slug) else {
            warn!(phase_slug, module_slug, "unresolvable module slug");
            return Ok(not_found(Path::new(phase_slug).join(module_slug)));
        };

        let path = self.root.join(&relative);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                debug!(path = %path.display(), bytes = text.len(), "module content loaded");
                Ok(ModuleContent::Found {
                    path: relative,
                    text,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "module document not found");
                Ok(not_found(relative))
            }
            Err(e) => Err(SyllabusError::io(&path, e)),
        }
    }

    /// Like [`fetch`](Self::fetch), but a missing document is an error.
    pub async fn fetch_text(&self, phase_slug: &str, module_slug: &str) -> Result<String> {
        match self.fetch(phase_slug, module_slug).await? {
            ModuleContent::Found { text, .. } => Ok(text),
            ModuleContent::NotFound { expected_path, .. } => {
                Err(SyllabusError::missing_document(expected_path))
            }
        }
    }
}

/// A single normal path component: no separators, no `.`/`..`, no root.
fn is_plain_filename(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn not_found(expected_path: PathBuf) -> ModuleContent {
    let placeholder = format!(
        "# Content not found\n\nThis module's document was expected at `{}`. \
         Check that the file exists and that its name follows the \
         `Module-<major>.<minor>-<Title>.md` convention.\n",
        expected_path.display()
    );
    ModuleContent::NotFound {
        expected_path,
        placeholder,
    }
}

//! Error types for Syllabus.
//!
//! Library crates use [`SyllabusError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Structural gaps in a lesson document and lossy identifier capitalization
//! are not errors: they resolve to documented defaults and never reach this
//! type.

use std::path::PathBuf;

/// Top-level error type for all Syllabus operations.
#[derive(Debug, thiserror::Error)]
pub enum SyllabusError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A declared directory is absent from disk.
    #[error("missing directory: {path:?}")]
    MissingDirectory { path: PathBuf },

    /// A requested module document was not found at fetch time.
    #[error("missing document: expected {expected:?}")]
    MissingDocument { expected: PathBuf },

    /// A config file that is not valid TOML for the schema.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SyllabusError>;

impl SyllabusError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_directory(path: impl Into<PathBuf>) -> Self {
        Self::MissingDirectory { path: path.into() }
    }

    pub fn missing_document(expected: impl Into<PathBuf>) -> Self {
        Self::MissingDocument {
            expected: expected.into(),
        }
    }

    /// Whether this error means "the thing is not there" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MissingDirectory { .. } | Self::MissingDocument { .. }
        )
    }
}

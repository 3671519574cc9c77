//! Core scanning and lookup logic for Syllabus.
//!
//! This crate walks a curriculum root, turns lesson documents into modules,
//! assembles the ordered [`CurriculumTree`](syllabus_shared::CurriculumTree),
//! and maps module slugs back to documents for the viewer.

pub mod assembler;
pub mod codec;
pub mod content;
pub mod difficulty;
pub mod pipeline;
pub mod walker;

pub use codec::IdentifierCodec;
pub use content::{ContentResolver, ModuleContent};
pub use pipeline::{ScanProgress, ScanResult, SilentProgress, scan};

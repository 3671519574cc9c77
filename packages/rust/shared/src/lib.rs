//! Shared types, error model, and configuration for Syllabus.
//!
//! This crate is the foundation depended on by all other Syllabus crates.
//! It provides:
//! - [`SyllabusError`]: the unified error type
//! - Domain types ([`CurriculumTree`], [`Phase`], [`Module`], [`Difficulty`])
//! - Configuration ([`AppConfig`], [`CurriculumConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CodecConfig, CurriculumConfig, CurriculumSection, DifficultyRule, FALLBACK_COLOR,
    config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, SyllabusError};
pub use types::{CurriculumTree, Difficulty, Module, Phase};

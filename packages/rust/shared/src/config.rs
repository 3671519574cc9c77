//! Application configuration for Syllabus.
//!
//! User config lives at `~/.syllabus/syllabus.toml`.
//! CLI flags override config file values, which override defaults.
//!
//! The file schema ([`AppConfig`]) is validated into an immutable runtime
//! [`CurriculumConfig`] that is passed explicitly to the walker, assembler and
//! identifier codec.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyllabusError};
use crate::types::Difficulty;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "syllabus.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".syllabus";

// ---------------------------------------------------------------------------
// Config structs (matching syllabus.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Curriculum layout and presentation.
    #[serde(default)]
    pub curriculum: CurriculumSection,

    /// Ordered phase-number ranges mapped to difficulty tiers.
    #[serde(default = "default_difficulty_rules")]
    pub difficulty: Vec<DifficultyRule>,

    /// Lowercase title word → exact rendering used when decoding identifiers.
    #[serde(default = "default_capitalization")]
    pub capitalization: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            curriculum: CurriculumSection::default(),
            difficulty: default_difficulty_rules(),
            capitalization: default_capitalization(),
        }
    }
}

/// `[curriculum]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumSection {
    /// Title of the whole curriculum.
    #[serde(default = "default_title")]
    pub title: String,

    /// One-line description of the whole curriculum.
    #[serde(default = "default_description")]
    pub description: String,

    /// Phase folder names in canonical order.
    #[serde(default = "default_phases")]
    pub phases: Vec<String>,

    /// Color tokens cycled across phases.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Filename of the per-phase overview document.
    #[serde(default = "default_overview_document")]
    pub overview_document: String,
}

impl Default for CurriculumSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            phases: default_phases(),
            palette: default_palette(),
            overview_document: default_overview_document(),
        }
    }
}

fn default_title() -> String {
    "Full-Stack Web Development Curriculum".into()
}
fn default_description() -> String {
    "A structured path from first principles to production-ready applications.".into()
}
fn default_phases() -> Vec<String> {
    [
        "Phase-0-Foundations",
        "Phase-1-HTML-CSS",
        "Phase-2-JavaScript-Fundamentals",
        "Phase-3-Advanced-JavaScript",
        "Phase-4-Frontend-Frameworks",
        "Phase-5-Backend-Development",
        "Phase-6-Tooling-And-DevOps",
        "Phase-7-Capstone",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_palette() -> Vec<String> {
    ["blue", "green", "purple", "orange", "red", "teal", "pink", "indigo"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_overview_document() -> String {
    "Phase-Overview.md".into()
}

/// `[[difficulty]]` entry: an inclusive range of phase numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRule {
    /// First phase number in the range.
    pub from: u32,
    /// Last phase number in the range (inclusive).
    pub to: u32,
    pub tier: Difficulty,
}

impl DifficultyRule {
    pub fn contains(&self, phase: u32) -> bool {
        (self.from..=self.to).contains(&phase)
    }
}

fn default_difficulty_rules() -> Vec<DifficultyRule> {
    vec![
        DifficultyRule {
            from: 0,
            to: 2,
            tier: Difficulty::Beginner,
        },
        DifficultyRule {
            from: 3,
            to: 5,
            tier: Difficulty::Intermediate,
        },
    ]
}

fn default_capitalization() -> BTreeMap<String, String> {
    [
        ("api", "API"),
        ("apis", "APIs"),
        ("css", "CSS"),
        ("devops", "DevOps"),
        ("dom", "DOM"),
        ("github", "GitHub"),
        ("graphql", "GraphQL"),
        ("html", "HTML"),
        ("http", "HTTP"),
        ("javascript", "JavaScript"),
        ("json", "JSON"),
        ("mongodb", "MongoDB"),
        ("nodejs", "NodeJS"),
        ("npm", "npm"),
        ("postgresql", "PostgreSQL"),
        ("rest", "REST"),
        ("sql", "SQL"),
        ("typescript", "TypeScript"),
        ("ui", "UI"),
        ("ux", "UX"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

// ---------------------------------------------------------------------------
// Runtime config (validated, immutable)
// ---------------------------------------------------------------------------

/// Identifier codec tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Filename that bypasses the general decode rule.
    pub overview_document: String,
    /// Lowercase token → rendering. Every value lowercases back to its key.
    pub exceptions: BTreeMap<String, String>,
}

/// Color token used when a hand-built config carries no palette.
pub const FALLBACK_COLOR: &str = "gray";

/// Validated runtime configuration for a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumConfig {
    pub title: String,
    pub description: String,
    /// Phase folder names in canonical order. Never empty.
    pub phases: Vec<String>,
    /// Non-empty after validation.
    pub palette: Vec<String>,
    pub difficulty: Vec<DifficultyRule>,
    pub codec: CodecConfig,
}

impl CurriculumConfig {
    /// Color token for the phase at `index`, cycling through the palette.
    pub fn color_for(&self, index: usize) -> &str {
        index
            .checked_rem(self.palette.len())
            .and_then(|i| self.palette.get(i))
            .map_or(FALLBACK_COLOR, String::as_str)
    }

    /// Canonical folder for a `phase-<index>` slug.
    pub fn phase_folder(&self, phase_slug: &str) -> Option<&str> {
        let index: usize = phase_slug.strip_prefix("phase-")?.parse().ok()?;
        self.phases.get(index).map(String::as_str)
    }
}

impl Default for CurriculumConfig {
    fn default() -> Self {
        let section = CurriculumSection::default();
        Self {
            title: section.title,
            description: section.description,
            phases: section.phases,
            palette: section.palette,
            difficulty: default_difficulty_rules(),
            codec: CodecConfig {
                overview_document: section.overview_document,
                exceptions: default_capitalization(),
            },
        }
    }
}

impl TryFrom<&AppConfig> for CurriculumConfig {
    type Error = SyllabusError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        let section = &config.curriculum;

        if section.phases.is_empty() {
            return Err(SyllabusError::config("curriculum.phases must not be empty"));
        }
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = section.phases.iter().find(|p| !seen.insert(p.as_str())) {
            return Err(SyllabusError::config(format!(
                "curriculum.phases lists {dup:?} more than once"
            )));
        }
        if section.palette.is_empty() {
            return Err(SyllabusError::config("curriculum.palette must not be empty"));
        }
        if section.overview_document.trim().is_empty() {
            return Err(SyllabusError::config(
                "curriculum.overview_document must not be empty",
            ));
        }

        for rule in &config.difficulty {
            if rule.from > rule.to {
                return Err(SyllabusError::config(format!(
                    "difficulty range {}..={} is inverted",
                    rule.from, rule.to
                )));
            }
        }

        let mut exceptions = BTreeMap::new();
        for (token, rendering) in &config.capitalization {
            let key = token.to_lowercase();
            if rendering.to_lowercase() != key || key.contains('-') || key.contains('.') {
                return Err(SyllabusError::config(format!(
                    "capitalization entry {token:?} = {rendering:?} does not map back to its key"
                )));
            }
            exceptions.insert(key, rendering.clone());
        }

        Ok(Self {
            title: section.title.clone(),
            description: section.description.clone(),
            phases: section.phases.clone(),
            palette: section.palette.clone(),
            difficulty: config.difficulty.clone(),
            codec: CodecConfig {
                overview_document: section.overview_document.clone(),
                exceptions,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.syllabus/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SyllabusError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.syllabus/syllabus.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SyllabusError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| SyllabusError::parse(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SyllabusError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| SyllabusError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SyllabusError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

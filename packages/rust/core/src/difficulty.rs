//! Difficulty inference from a document's phase location.
//!
//! Content is never consulted: the tier is a function of the phase path alone.

use std::sync::LazyLock;

use regex::Regex;

use syllabus_shared::{Difficulty, DifficultyRule};

/// `Phase-3`, `phase_3`, `Phase 3`, `Phase3`.
static PHASE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)phase[-_ ]?(\d+)").expect("phase number regex"));

/// Tier used when no rule matches.
pub const DEFAULT_DIFFICULTY: Difficulty = Difficulty::Advanced;

/// Phase number named in `path`, taken from the last `Phase N` occurrence.
pub fn phase_number(path: &str) -> Option<u32> {
    PHASE_NUMBER_RE
        .captures_iter(path)
        .last()
        .and_then(|caps| caps[1].parse().ok())
}

/// First rule whose range contains the path's phase number, else Advanced.
pub fn infer_difficulty(path: &str, rules: &[DifficultyRule]) -> Difficulty {
    phase_number(path)
        .and_then(|n| rules.iter().find(|rule| rule.contains(n)))
        .map_or(DEFAULT_DIFFICULTY, |rule| rule.tier)
}

//! Identifier codec: document filename ⇄ URL-safe slug.
//!
//! `encode` is total and deterministic. `decode` rebuilds a fetchable
//! filename from a slug. Identifiers always survive a decode/encode cycle;
//! filenames only do so when every title word is either a plain capitalized
//! word or listed in the capitalization table. Anything else (an acronym
//! missing from the table, a camel-cased compound) decodes to a differently
//! cased filename. That loss is accepted and never reported as an error.

use std::collections::BTreeMap;

use syllabus_shared::CodecConfig;

/// Prefix token of every conventional module identifier.
const MODULE_TOKEN: &str = "module";

/// Filename suffix produced by `decode`.
const DOCUMENT_EXTENSION: &str = ".md";

/// Strip a trailing file extension.
///
/// Only a final `.xyz` made of ASCII alphanumerics with at least one letter
/// counts, so the `.1` in `Module-0.1` is never mistaken for one.
pub fn strip_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
                && ext.chars().any(|c| c.is_ascii_alphabetic()) =>
        {
            stem
        }
        _ => filename,
    }
}

/// Encode a filename into its slug: drop the extension, lowercase, `.` → `-`.
pub fn encode(filename: &str) -> String {
    strip_extension(filename).to_lowercase().replace('.', "-")
}

/// Reversible filename/slug mapping configured with explicit tables.
#[derive(Debug, Clone)]
pub struct IdentifierCodec {
    overview_document: String,
    overview_id: String,
    exceptions: BTreeMap<String, String>,
}

impl IdentifierCodec {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            overview_id: encode(&config.overview_document),
            overview_document: config.overview_document.clone(),
            exceptions: config.exceptions.clone(),
        }
    }

    /// Slug for `filename`.
    pub fn encode(&self, filename: &str) -> String {
        encode(filename)
    }

    /// Filename for `id`.
    ///
    /// The overview document's slug maps straight back to its filename.
    /// Conventional slugs (`module-<major>-<minor>-<words…>`) become
    /// `Module-<major>.<minor>-<Words…>.md`. Anything else is decoded
    /// best-effort by title-casing every token.
    pub fn decode(&self, id: &str) -> String {
        if id == self.overview_id {
            return self.overview_document.clone();
        }

        let tokens: Vec<&str> = id.split('-').collect();
        match tokens.as_slice() {
            [prefix, major, minor, words @ ..]
                if *prefix == MODULE_TOKEN && is_numeric(major) && is_numeric(minor) =>
            {
                let mut filename = format!("Module-{major}.{minor}");
                for word in words {
                    filename.push('-');
                    filename.push_str(&self.render_word(word));
                }
                filename.push_str(DOCUMENT_EXTENSION);
                filename
            }
            _ => {
                let stem = tokens
                    .iter()
                    .map(|t| self.render_word(t))
                    .collect::<Vec<_>>()
                    .join("-");
                format!("{stem}{DOCUMENT_EXTENSION}")
            }
        }
    }

    /// Whether `filename` comes back unchanged from a slug round trip.
    pub fn round_trips(&self, filename: &str) -> bool {
        self.decode(&self.encode(filename)) == filename
    }

    /// The overview document's own slug.
    pub fn overview_id(&self) -> &str {
        &self.overview_id
    }

    fn render_word(&self, word: &str) -> String {
        match self.exceptions.get(word) {
            Some(rendering) => rendering.clone(),
            None => capitalize(word),
        }
    }
}

/// Upper-case the first character, unless that would not lowercase back.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let upper: String = first.to_uppercase().collect();
            if upper.to_lowercase() == first.to_string() {
                format!("{upper}{}", chars.as_str())
            } else {
                word.to_string()
            }
        }
        None => String::new(),
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_shared::CurriculumConfig;

    fn codec() -> IdentifierCodec {
        IdentifierCodec::new(&CurriculumConfig::default().codec)
    }

    #[test]
    fn encode_example() {
        assert_eq!(
            encode("Module-0.1-Development-Environment-Setup.md"),
            "module-0-1-development-environment-setup"
        );
    }

    #[test]
    fn decode_example() {
        assert_eq!(
            codec().decode("module-6-1-modern-build-tools"),
            "Module-6.1-Modern-Build-Tools.md"
        );
    }

    #[test]
    fn decode_uses_exception_table() {
        assert_eq!(
            codec().decode("module-2-3-javascript-and-the-dom"),
            "Module-2.3-JavaScript-And-The-DOM.md"
        );
    }

    #[test]
    fn overview_bypasses_general_rule() {
        let codec = codec();
        assert_eq!(codec.overview_id(), "phase-overview");
        assert_eq!(codec.decode("phase-overview"), "Phase-Overview.md");
    }

    #[test]
    fn custom_overview_document() {
        let mut config = CurriculumConfig::default().codec;
        config.overview_document = "00-INTRO.md".into();
        let codec = IdentifierCodec::new(&config);
        assert_eq!(codec.decode("00-intro"), "00-INTRO.md");
    }

    #[test]
    fn identifier_round_trip_is_exact() {
        let codec = codec();
        let filenames = [
            "Module-0.1-Development-Environment-Setup.md",
            "Module-1.2-CSS-Layout.md",
            "Module-3.10-WebSockets-And-SSE.md",
            "Module-4.1-React-Hooks.md",
            "Module-6.1-Modern-Build-Tools.md",
            "Module-7.1.md",
            "Phase-Overview.md",
        ];
        for filename in filenames {
            let id = encode(filename);
            assert_eq!(encode(&codec.decode(&id)), id, "round trip for {filename}");
        }
    }

    #[test]
    fn filename_round_trip_is_lossy_for_unknown_compounds() {
        let codec = codec();
        assert!(codec.round_trips("Module-1.1-HTML-Fundamentals.md"));
        assert!(!codec.round_trips("Module-3.10-WebSockets-And-SSE.md"));
        assert_eq!(
            codec.decode(&encode("Module-3.10-WebSockets-And-SSE.md")),
            "Module-3.10-Websockets-And-Sse.md"
        );
    }

    #[test]
    fn exceptions_are_injectable() {
        let mut config = CurriculumConfig::default().codec;
        config.exceptions.insert("websockets".into(), "WebSockets".into());
        config.exceptions.insert("sse".into(), "SSE".into());
        let codec = IdentifierCodec::new(&config);
        assert!(codec.round_trips("Module-3.10-WebSockets-And-SSE.md"));
    }

    #[test]
    fn unconventional_ids_decode_best_effort() {
        let codec = codec();
        assert_eq!(codec.decode("readme"), "Readme.md");
        assert_eq!(codec.decode("module-x-1-intro"), "Module-X-1-Intro.md");
        assert_eq!(codec.decode(""), ".md");
    }

    #[test]
    fn strip_extension_rules() {
        assert_eq!(strip_extension("Module-0.1-Intro.md"), "Module-0.1-Intro");
        assert_eq!(strip_extension("Module-0.1"), "Module-0.1");
        assert_eq!(strip_extension("notes.markdown"), "notes");
        assert_eq!(strip_extension(".md"), ".md");
        assert_eq!(strip_extension("plain"), "plain");
    }

    #[test]
    fn encode_is_total() {
        assert_eq!(encode(""), "");
        assert_eq!(encode("A.B.C"), "a-b");
        assert_eq!(encode("Ünïcode-Title.md"), "ünïcode-title");
    }

    #[test]
    fn capitalize_keeps_unmappable_letters() {
        assert_eq!(capitalize("ßtraße"), "ßtraße");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize("9lives"), "9lives");
    }
}

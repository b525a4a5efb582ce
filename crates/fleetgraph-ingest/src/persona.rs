//! Persona metadata extraction.
//!
//! The user persona lives as a `const <name> = { ... };` literal inside a
//! loosely-structured upstream source file. A single bounded pattern pulls
//! the literal out; the matched text is carried opaquely for graph display
//! and is never parsed as structured data.
//!
//! This module is the seam for replacing the scrape with a proper data file
//! from the upstream: callers only see [`PersonaSnapshot`].

use regex::Regex;
use std::path::Path;

/// Result of one persona load. `persona` is `None` whenever the file is
/// unreadable or no literal matches; neither is an error condition.
#[derive(Debug, Clone)]
pub struct PersonaSnapshot {
    pub persona: Option<String>,
    pub source: String,
}

/// Load the persona snippet from a source file.
pub fn load_persona_metadata(path: &Path) -> PersonaSnapshot {
    let source = path.display().to_string();

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %source, error = %err, "persona source unreadable");
            return PersonaSnapshot {
                persona: None,
                source,
            };
        }
    };

    PersonaSnapshot {
        persona: extract_persona_literal(&text),
        source,
    }
}

/// Extract the first `const <name> = { ... };` literal from `text`, trimmed.
///
/// The brace body is matched lazily up to the first `};`, which bounds the
/// scan; nested trailing content is deliberately not chased.
pub fn extract_persona_literal(text: &str) -> Option<String> {
    let pattern = Regex::new(r"(?s)const\s+[A-Za-z_][A-Za-z0-9_]*\s*=\s*\{.*?\};").unwrap();
    pattern
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

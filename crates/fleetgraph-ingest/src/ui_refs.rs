//! Referenced UI component scan.
//!
//! Extracts the distinct set of component names referenced as opening tags
//! (`<UppercaseIdentifier`) in a page source. First-appearance order is
//! preserved; lowercase (host) tags are ignored.

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

/// Result of one scan. Empty on read failure.
#[derive(Debug, Clone)]
pub struct ComponentScan {
    pub components: Vec<String>,
    pub source: String,
}

/// Scan the UI source file for referenced component names.
pub fn list_referenced_components(path: &Path) -> ComponentScan {
    let source = path.display().to_string();

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %source, error = %err, "ui source unreadable");
            return ComponentScan {
                components: Vec::new(),
                source,
            };
        }
    };

    ComponentScan {
        components: scan_component_references(&text),
        source,
    }
}

/// Every distinct `<UppercaseIdentifier` occurrence, in order of first
/// appearance.
pub fn scan_component_references(text: &str) -> Vec<String> {
    let pattern = Regex::new(r"<([A-Z][A-Za-z0-9]*)").unwrap();

    let mut seen = HashSet::new();
    let mut components = Vec::new();
    for capture in pattern.captures_iter(text) {
        let name = capture[1].to_string();
        if seen.insert(name.clone()) {
            components.push(name);
        }
    }
    components
}

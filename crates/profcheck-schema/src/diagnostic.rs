//! # Diagnostic Formatting
//!
//! Turns a [`Violation`] into a single readable line.
//!
//! Unexpected properties get a short, pointed message naming the full path
//! of the offending key (`.spec.colour is not a thing`). Every other
//! violation is rendered as its location followed by the engine's message.

use std::sync::OnceLock;

use regex::Regex;

use crate::violation::{quote, Violation, ViolationKind};

/// Keys that can be written after a dot without quoting.
fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap_or_else(|e| {
            unreachable!("identifier pattern is a valid regex: {e}")
        })
    })
}

pub(crate) fn is_identifier(name: &str) -> bool {
    identifier_pattern().is_match(name)
}

/// Render one violation as a report line.
pub fn format_violation(violation: &Violation) -> String {
    match &violation.kind {
        ViolationKind::AdditionalProperty { property } => {
            let location = &violation.location;
            if is_identifier(property) {
                let dot = if location.is_empty() { "" } else { "." };
                format!("{location}{dot}{property} is not a thing")
            } else {
                format!("{location}[{}] is not a thing", quote(property))
            }
        }
        ViolationKind::Required { .. } | ViolationKind::Other { .. } => {
            let location = violation
                .location
                .strip_prefix('.')
                .unwrap_or(&violation.location);
            if location.is_empty() {
                violation.message.clone()
            } else {
                format!("{location} {}", violation.message)
            }
        }
    }
}

//! # Validation Violations
//!
//! A [`Violation`] is one schema error raised against a document, stripped
//! of engine lifetimes and reduced to what diagnostics need: where in the
//! document it happened, which keyword failed, and the engine's message.
//!
//! Keywords that the diagnostic formatter treats specially are modelled as
//! dedicated [`ViolationKind`] variants; everything else falls into
//! [`ViolationKind::Other`] with the keyword preserved.

use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::ValidationError;
use serde_json::Value;

use crate::diagnostic::is_identifier;

/// The failing keyword, with the parameters the formatter needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// An object carried a property its schema does not allow.
    AdditionalProperty {
        /// The unexpected property name.
        property: String,
    },
    /// A required property is missing.
    Required {
        /// The missing property name.
        property: String,
    },
    /// Any other keyword.
    Other {
        /// JSON-Schema keyword, e.g. `type` or `pattern`.
        keyword: String,
    },
}

impl ViolationKind {
    /// JSON-Schema keyword that produced the violation.
    pub fn keyword(&self) -> &str {
        match self {
            Self::AdditionalProperty { .. } => "additionalProperties",
            Self::Required { .. } => "required",
            Self::Other { keyword } => keyword,
        }
    }
}

/// A single schema violation with its document location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dot/bracket path into the document, e.g. `.spec.ports[0]`.
    /// Empty for the document root.
    pub location: String,
    pub kind: ViolationKind,
    /// Human-readable description from the validation engine.
    pub message: String,
}

impl Violation {
    pub fn new(location: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            kind,
            message: message.into(),
        }
    }

    /// Convert one engine error into violations.
    ///
    /// An `additionalProperties` error naming several unexpected properties
    /// becomes one violation per property so that each is reported on its
    /// own line.
    pub(crate) fn from_engine(error: &ValidationError<'_>, document: &Value) -> Vec<Self> {
        let location = location_path(&error.instance_path.to_string(), document);

        match &error.kind {
            ValidationErrorKind::AdditionalProperties { unexpected } => unexpected
                .iter()
                .map(|property| {
                    Self::new(
                        location.clone(),
                        ViolationKind::AdditionalProperty {
                            property: property.clone(),
                        },
                        format!("Additional properties are not allowed ('{property}' was unexpected)"),
                    )
                })
                .collect(),
            ValidationErrorKind::Required { property } => {
                let property = match property {
                    Value::String(name) => name.clone(),
                    other => other.to_string(),
                };
                vec![Self::new(
                    location,
                    ViolationKind::Required { property },
                    error.to_string(),
                )]
            }
            _ => vec![Self::new(
                location,
                ViolationKind::Other {
                    keyword: keyword_from_schema_path(&error.schema_path.to_string()),
                },
                error.to_string(),
            )],
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::diagnostic::format_violation(self))
    }
}

/// Last segment of the schema path names the keyword that failed.
fn keyword_from_schema_path(schema_path: &str) -> String {
    schema_path
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(unescape_pointer_segment)
        .unwrap_or_else(|| "schema".to_string())
}

/// Render a JSON Pointer into `document` as a dot/bracket path.
///
/// Array indices become `[n]`, identifier-like keys `.key`, and other keys
/// `["key"]`. The document is consulted so that numeric object keys are not
/// mistaken for array indices.
pub(crate) fn location_path(pointer: &str, document: &Value) -> String {
    let mut out = String::new();
    let mut current = Some(document);

    for raw in pointer.split('/').skip(1) {
        let segment = unescape_pointer_segment(raw);
        match current {
            Some(Value::Array(items)) => {
                out.push('[');
                out.push_str(&segment);
                out.push(']');
                current = segment.parse::<usize>().ok().and_then(|i| items.get(i));
            }
            _ => {
                if is_identifier(&segment) {
                    out.push('.');
                    out.push_str(&segment);
                } else {
                    out.push('[');
                    out.push_str(&quote(&segment));
                    out.push(']');
                }
                current = current.and_then(|v| v.get(segment.as_str()));
            }
        }
    }

    out
}

fn unescape_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

pub(crate) fn quote(name: &str) -> String {
    Value::String(name.to_string()).to_string()
}

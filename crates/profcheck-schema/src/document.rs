//! # Document Validation
//!
//! Reads one YAML document, parses it into a JSON value tree and checks it
//! against its kind's compiled schema.
//!
//! ## JSON-Compatible Parsing
//!
//! Schemas describe JSON data, so documents are restricted to what JSON
//! can express: null, booleans, finite numbers, strings, sequences and
//! mappings with scalar keys. Explicit YAML tags (`!secret`, `!!binary`)
//! and non-finite floats (`.inf`, `.nan`) are rejected as parse errors
//! rather than silently coerced.
//!
//! Nothing here is fatal to a run: every failure is recorded in the
//! returned [`FileResult`].

use profcheck_core::InputFile;
use serde_json::Value;

use crate::loader::CompiledValidator;
use crate::violation::Violation;

/// What happened to a single file. Exactly one outcome per file.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Parsed and matched its schema.
    Valid,
    /// The file could not be read.
    ReadError(String),
    /// The file is not a JSON-compatible YAML document.
    ParseError(String),
    /// The document violates its schema. Never empty.
    SchemaErrors(Vec<Violation>),
}

/// Per-file validation result.
#[derive(Debug, Clone, PartialEq)]
pub struct FileResult {
    /// The path as given on the command line.
    pub filename: String,
    pub outcome: Outcome,
}

impl FileResult {
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, Outcome::Valid)
    }

    /// Read or parse failure text, if the document never reached the schema.
    pub fn parse_error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::ReadError(reason) | Outcome::ParseError(reason) => Some(reason),
            Outcome::Valid | Outcome::SchemaErrors(_) => None,
        }
    }

    pub fn schema_errors(&self) -> Option<&[Violation]> {
        match &self.outcome {
            Outcome::SchemaErrors(violations) => Some(violations),
            _ => None,
        }
    }
}

/// Read, parse and validate one file.
pub async fn validate_file(file: &InputFile, validator: &CompiledValidator) -> FileResult {
    let filename = file.path().to_string();

    let outcome = match tokio::fs::read_to_string(file.path()).await {
        Err(e) => Outcome::ReadError(format!("cannot read file: {e}")),
        Ok(content) => check_content(&content, validator),
    };

    match &outcome {
        Outcome::Valid => tracing::debug!(file = %filename, kind = %file.kind(), "valid"),
        Outcome::ReadError(reason) | Outcome::ParseError(reason) => {
            tracing::debug!(file = %filename, kind = %file.kind(), %reason, "not validated")
        }
        Outcome::SchemaErrors(violations) => tracing::debug!(
            file = %filename,
            kind = %file.kind(),
            violations = violations.len(),
            "schema violations"
        ),
    }

    FileResult { filename, outcome }
}

fn check_content(content: &str, validator: &CompiledValidator) -> Outcome {
    let document = match parse_document(content) {
        Ok(document) => document,
        Err(reason) => return Outcome::ParseError(reason),
    };

    let violations = validator.validate(&document);
    if violations.is_empty() {
        Outcome::Valid
    } else {
        Outcome::SchemaErrors(violations)
    }
}

/// Parse YAML text into a JSON value, accepting only JSON-compatible data.
///
/// # Errors
///
/// Returns the parser's message for malformed YAML, or a description of
/// the first construct JSON cannot represent.
pub fn parse_document(content: &str) -> Result<Value, String> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    yaml_to_json_value(&yaml)
}

fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("number {n} cannot be represented in JSON"))
            } else {
                Err(format!("unsupported number: {n}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => "null".to_string(),
                    _ => return Err("mapping keys must be scalars".to_string()),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => {
            Err(format!("unsupported tag {} (only plain JSON-compatible values are allowed)", tagged.tag))
        }
    }
}

//! # Schema Loading & Compilation
//!
//! Loads the schema for one document kind from a versioned schema
//! directory and compiles it into a reusable [`CompiledValidator`].
//!
//! ## Layout
//!
//! ```text
//! <schema_root>/<version>/profiles.json
//! <schema_root>/<version>/legacies.json
//! ```
//!
//! ## Dialects
//!
//! The draft is not pinned. Each schema's `$schema` selects its dialect,
//! so a version directory written against draft-04 and another written
//! against 2020-12 both compile with the same options. Schemas without
//! `$schema` use the engine default (2020-12). An unknown `$schema` fails
//! compilation.
//!
//! ## Schema Resolution
//!
//! Cross-file `$ref`s are resolved by file name against the version
//! directory. The retriever never touches the network; a reference to a
//! file that does not exist there fails compilation.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use profcheck_core::{DocumentKind, Strictness};
use serde_json::Value;
use thiserror::Error;

use crate::tighten::tighten;
use crate::violation::Violation;

/// Fatal errors while preparing a kind's validator.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file is missing, unreadable, or not JSON.
    #[error("cannot load {kind} schema '{path}': {reason}")]
    Load {
        kind: DocumentKind,
        path: PathBuf,
        reason: String,
    },

    /// The schema is not a valid schema for its dialect, declares an
    /// unsupported meta-schema, or has an unresolvable `$ref`.
    #[error("cannot compile {kind} schema '{path}': {reason}")]
    Compile {
        kind: DocumentKind,
        path: PathBuf,
        reason: String,
    },

    /// A loader task ended without producing a result.
    #[error("{kind} schema loader did not complete: {reason}")]
    Interrupted { kind: DocumentKind, reason: String },
}

/// Resolves `$ref` URIs to sibling schema files in the version directory.
struct LocalSchemaRetriever {
    version_dir: PathBuf,
    strictness: Strictness,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let filename = uri_str
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty() && *name != "..")
            .ok_or_else(|| format!("cannot resolve '{uri_str}' to a schema file"))?;

        let path = self.version_dir.join(filename);
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot resolve '{uri_str}' via {}: {e}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| format!("invalid JSON in {}: {e}", path.display()))?;

        tracing::debug!(uri = uri_str, path = %path.display(), "resolved schema reference");

        Ok(match self.strictness {
            Strictness::Tight => tighten(&value),
            Strictness::Loose => value,
        })
    }
}

/// A compiled schema bound to the document kind it validates.
pub struct CompiledValidator {
    kind: DocumentKind,
    source: PathBuf,
    validator: Validator,
}

impl fmt::Debug for CompiledValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledValidator")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl CompiledValidator {
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Path of the schema file this validator was compiled from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Validate a parsed document. An empty list means it is valid.
    pub fn validate(&self, document: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(document)
            .flat_map(|error| Violation::from_engine(&error, document))
            .collect()
    }
}

/// Compile an already-parsed schema.
///
/// `version_dir` anchors cross-file `$ref` resolution; `source` is only
/// used for error messages and diagnostics.
///
/// # Errors
///
/// Returns `SchemaError::Compile` if the engine rejects the schema.
pub fn compile_schema(
    kind: DocumentKind,
    schema: &Value,
    source: &Path,
    version_dir: &Path,
    strictness: Strictness,
) -> Result<CompiledValidator, SchemaError> {
    let schema = match strictness {
        Strictness::Tight => tighten(schema),
        Strictness::Loose => schema.clone(),
    };

    let mut opts = jsonschema::options();
    opts.with_retriever(LocalSchemaRetriever {
        version_dir: version_dir.to_path_buf(),
        strictness,
    });

    let validator = opts.build(&schema).map_err(|e| SchemaError::Compile {
        kind,
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(CompiledValidator {
        kind,
        source: source.to_path_buf(),
        validator,
    })
}

/// Load and compile the schema for `kind` from `<schema_root>/<version>/`.
///
/// # Errors
///
/// Returns `SchemaError::Load` if the file cannot be read or is not JSON,
/// and `SchemaError::Compile` if it is not a usable schema.
pub async fn load_validator(
    kind: DocumentKind,
    schema_root: &Path,
    version: &str,
    strictness: Strictness,
) -> Result<CompiledValidator, SchemaError> {
    let version_dir = schema_root.join(version);
    let path = version_dir.join(kind.schema_file_name());

    tracing::debug!(%kind, path = %path.display(), %strictness, "loading schema");

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| SchemaError::Load {
            kind,
            path: path.clone(),
            reason: e.to_string(),
        })?;

    let schema: Value = serde_json::from_str(&content).map_err(|e| SchemaError::Load {
        kind,
        path: path.clone(),
        reason: format!("invalid JSON: {e}"),
    })?;

    // The retriever may read further files while compiling.
    let compiled = tokio::task::spawn_blocking(move || {
        compile_schema(kind, &schema, &path, &version_dir, strictness)
    })
    .await
    .map_err(|e| SchemaError::Interrupted {
        kind,
        reason: e.to_string(),
    })??;

    tracing::info!(%kind, path = %compiled.source.display(), %strictness, "compiled schema");

    Ok(compiled)
}

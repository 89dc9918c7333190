//! # profcheck-schema: Schema Loading, Validation & Diagnostics
//!
//! Validates YAML documents against per-kind JSON schemas and turns raw
//! validation errors into one-line diagnostics.
//!
//! ## Pipeline
//!
//! 1. [`tighten`]: optionally rewrites a schema so that every object
//!    schema listing `properties` rejects unlisted ones.
//! 2. [`load_validator`]: reads `<root>/<version>/<kind>.json`, tightens
//!    it under [`Strictness::Tight`](profcheck_core::Strictness), and
//!    compiles it. The draft is detected per document, so draft-04 and
//!    2020-12 schemas can be used in the same run.
//! 3. [`ValidatorRegistry`]: run-scoped cache holding at most one
//!    compiled validator per kind.
//! 4. [`validate_file`]: reads and parses one document and runs its
//!    kind's validator, producing a [`FileResult`].
//! 5. [`format_violation`]: renders a [`Violation`] as a readable line.
//!
//! ## Crate Policy
//!
//! - Depends only on `profcheck-core` internally.
//! - Per-file failures (unreadable file, bad YAML, schema violations) are
//!   data in a [`FileResult`], never errors. Only schema loading and
//!   compilation return [`SchemaError`].
//! - No network access: cross-file `$ref`s resolve to sibling files in the
//!   schema version directory.

pub mod diagnostic;
pub mod document;
pub mod loader;
pub mod registry;
pub mod tighten;
pub mod violation;

pub use diagnostic::format_violation;
pub use document::{parse_document, validate_file, FileResult, Outcome};
pub use loader::{compile_schema, load_validator, CompiledValidator, SchemaError};
pub use registry::ValidatorRegistry;
pub use tighten::tighten;
pub use violation::{Violation, ViolationKind};

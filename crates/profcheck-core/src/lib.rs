//! # profcheck-core: Foundational Types
//!
//! Shared vocabulary for the profcheck workspace. Every other crate depends
//! on this one; it depends on nothing internal.
//!
//! ## Contents
//!
//! - [`DocumentKind`]: the two document kinds (`profiles`, `legacies`),
//!   each governed by its own schema.
//! - [`Strictness`]: whether unknown object properties are rejected.
//! - [`InputFile`]: a classified input path, immutable once built.
//! - [`ConfigError`]: fatal configuration failures that abort a run
//!   before any I/O.
//! - [`RunConfig`]: schema root and version, resolved from the
//!   environment.
//!
//! ## Crate Policy
//!
//! - No I/O and no async here; these are plain data types.
//! - Configuration errors are hard errors. A run never silently overrides
//!   a conflicting setting.

pub mod config;
pub mod error;
pub mod kind;

pub use config::{RunConfig, DEFAULT_SCHEMA_ROOT, DEFAULT_SCHEMA_VERSION};
pub use error::ConfigError;
pub use kind::{DocumentKind, InputFile, Strictness};

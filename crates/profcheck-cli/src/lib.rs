//! # profcheck-cli: Command-Line Validator
//!
//! Validates profile and legacy YAML documents named on the command line.
//!
//! ```bash
//! profcheck profiles/web.yaml legacies/old.yaml
//! profcheck --loose --legacies archive/*.yaml --sniff profiles/*.yaml
//! ```
//!
//! ## Modules
//!
//! - [`classify`]: interprets mode-switch flags and assigns each file
//!   argument a document kind.
//! - [`run`]: drives a whole run: classify, load schemas, validate files
//!   concurrently, collect a [`RunReport`].
//! - [`report`]: renders a [`RunReport`] for the console.
//!
//! ## Crate Policy
//!
//! - Argument interpretation is separated from I/O: classification runs to
//!   completion, and fails fast, before any file is touched.
//! - Handler logic lives in the domain crates; this crate only wires them.

pub mod classify;
pub mod report;
pub mod run;

pub use classify::{classify, Classification, ClassificationMode, ClassifyWarning};
pub use report::render_report;
pub use run::{run, validate_inputs, RunError, RunReport};

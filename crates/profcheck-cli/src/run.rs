//! # Run Aggregation
//!
//! Drives one validation run through its phases:
//!
//! ```text
//! Idle → Classifying → LoadingSchemas → Validating → Reporting → Done
//! ```
//!
//! Classification and schema loading are fatal on error. Validation is
//! per file: one task per document, all joined in command-line order, so
//! one bad file never stops the others.

use std::fmt;
use std::sync::Arc;

use profcheck_core::{ConfigError, InputFile, RunConfig};
use profcheck_schema::{validate_file, FileResult, SchemaError, ValidatorRegistry};
use thiserror::Error;

use crate::classify::classify;

/// Phases of a run, logged as they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Classifying,
    LoadingSchemas,
    Validating,
    Reporting,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Classifying => "classifying",
            Self::LoadingSchemas => "loading-schemas",
            Self::Validating => "validating",
            Self::Reporting => "reporting",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Errors that end a run before a report can be produced.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A per-file task died or a classified kind had no validator.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Ordered per-file results of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    results: Vec<FileResult>,
}

impl RunReport {
    pub fn new(results: Vec<FileResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[FileResult] {
        &self.results
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileResult> {
        self.results.iter().filter(|r| !r.is_valid())
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.is_valid()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// True when every file validated.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(FileResult::is_valid)
    }
}

/// Run the whole pipeline over raw command-line tokens.
///
/// # Errors
///
/// Returns `RunError::Config` for flag/ordering/classification problems
/// and `RunError::Schema` when a needed schema cannot be loaded. Both are
/// raised before any document is read.
pub async fn run<S: AsRef<str>>(tokens: &[S], config: &RunConfig) -> Result<RunReport, RunError> {
    enter(Phase::Idle);

    enter(Phase::Classifying);
    let classification = classify(tokens)?;
    for warning in &classification.warnings {
        tracing::warn!("{warning}");
    }
    if classification.files.is_empty() {
        tracing::warn!("no input files given");
    }
    tracing::info!(
        profiles = classification.profiles().len(),
        legacies = classification.legacies().len(),
        strictness = %classification.strictness,
        "classified inputs"
    );

    enter(Phase::LoadingSchemas);
    let registry = ValidatorRegistry::load(
        config,
        classification.strictness,
        classification.kinds(),
    )
    .await?;

    enter(Phase::Validating);
    let report = validate_inputs(classification.files, &registry).await?;

    enter(Phase::Reporting);
    tracing::info!(
        total = report.total(),
        passed = report.passed(),
        failed = report.failed(),
        "validation finished"
    );

    enter(Phase::Done);
    Ok(report)
}

/// Validate classified files concurrently, one task per file.
///
/// Results come back in the order of `files`.
///
/// # Errors
///
/// Returns `RunError::Internal` if a file's kind has no validator in the
/// registry or a validation task fails to complete.
pub async fn validate_inputs(
    files: Vec<InputFile>,
    registry: &ValidatorRegistry,
) -> Result<RunReport, RunError> {
    let mut handles = Vec::with_capacity(files.len());
    for file in files {
        let validator = registry.get(file.kind()).ok_or_else(|| {
            RunError::Internal(format!("no {} validator loaded for '{}'", file.kind(), file.path()))
        })?;
        handles.push(tokio::spawn(validate_owned(file, validator)));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle
            .await
            .map_err(|e| RunError::Internal(format!("validation task failed: {e}")))?;
        results.push(result);
    }

    Ok(RunReport::new(results))
}

async fn validate_owned(
    file: InputFile,
    validator: Arc<profcheck_schema::CompiledValidator>,
) -> FileResult {
    validate_file(&file, &validator).await
}

fn enter(phase: Phase) {
    tracing::debug!(%phase, "entering phase");
}

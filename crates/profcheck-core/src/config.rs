//! Run configuration.
//!
//! Resolves where schemas live and which schema version to use. Defaults
//! point at `schemas/v1` relative to the working directory. Override via
//! environment variables or explicit construction for tests.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable naming the directory that holds one subdirectory
/// per schema version.
pub const SCHEMA_ROOT_ENV: &str = "PROFCHECK_SCHEMA_ROOT";

/// Environment variable selecting the schema version subdirectory.
pub const SCHEMA_VERSION_ENV: &str = "PROFCHECK_SCHEMA_VERSION";

pub const DEFAULT_SCHEMA_ROOT: &str = "schemas";
pub const DEFAULT_SCHEMA_VERSION: &str = "v1";

/// Where to find schemas for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory containing one subdirectory per schema version.
    pub schema_root: PathBuf,
    /// Name of the version subdirectory under `schema_root`.
    pub schema_version: String,
}

impl RunConfig {
    pub fn new(schema_root: impl Into<PathBuf>, schema_version: impl Into<String>) -> Self {
        Self {
            schema_root: schema_root.into(),
            schema_version: schema_version.into(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PROFCHECK_SCHEMA_ROOT` (default: `schemas`)
    /// - `PROFCHECK_SCHEMA_VERSION` (default: `v1`)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnv` if a variable is set but empty, or
    /// if the version would escape the schema root.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`RunConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let schema_root = env_or_default(&lookup, SCHEMA_ROOT_ENV, DEFAULT_SCHEMA_ROOT)?;
        let schema_version = env_or_default(&lookup, SCHEMA_VERSION_ENV, DEFAULT_SCHEMA_VERSION)?;

        if schema_version.contains('/') || schema_version.contains('\\') || schema_version == ".." {
            return Err(ConfigError::InvalidEnv {
                var: SCHEMA_VERSION_ENV.to_string(),
                reason: format!("'{schema_version}' is not a single directory name"),
            });
        }

        Ok(Self::new(schema_root, schema_version))
    }

    /// Directory holding the schema documents for the selected version.
    pub fn version_dir(&self) -> PathBuf {
        self.schema_root.join(&self.schema_version)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMA_ROOT, DEFAULT_SCHEMA_VERSION)
    }
}

fn env_or_default<F>(lookup: &F, var: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnv {
            var: var.to_string(),
            reason: "value is empty".to_string(),
        }),
        Some(value) => Ok(value),
    }
}

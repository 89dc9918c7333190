//! # Configuration Errors
//!
//! Errors in this module are raised while interpreting command-line tokens
//! or environment settings. All of them are fatal: the run stops before any
//! schema or document is read and exits with status 1.

use thiserror::Error;

/// A fatal configuration problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A `--` token that is not one of the recognised mode switches.
    #[error("unrecognized flag '{0}'")]
    UnknownFlag(String),

    /// A run-wide setting appeared after the first file argument.
    #[error("{flag} must come before any file arguments (found after '{first_file}')")]
    OrderViolation {
        /// The offending flag.
        flag: String,
        /// The first file argument that had already been classified.
        first_file: String,
    },

    /// Sniffing was disabled and no explicit kind was in effect.
    #[error("cannot determine document kind for '{0}': sniffing is disabled and neither --profiles nor --legacies is in effect")]
    Unclassified(String),

    /// An environment variable was set to an unusable value.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnv {
        /// Environment variable name.
        var: String,
        /// Why the value was rejected.
        reason: String,
    },
}

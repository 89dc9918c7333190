//! # File Classification
//!
//! Walks the command-line tokens in order, applying mode switches as they
//! appear and assigning every file argument a [`DocumentKind`].
//!
//! ## Flags
//!
//! | Flag | Effect on later file arguments |
//! |---|---|
//! | `--profiles` | classify as profiles |
//! | `--legacies` | classify as legacies |
//! | `--sniff` | clear any explicit kind; infer kind from the path |
//! | `--nosniff` | stop inferring; an explicit kind stays in effect |
//! | `--loose` | compile schemas untightened (must precede all files) |
//!
//! Sniffing looks at the directory a file sits in: `profiles/` or
//! `legacies/`. Anything else is assumed to be a profile, with a warning.
//!
//! Classification is pure. Warnings are returned for the caller to log,
//! and every configuration error is raised before any I/O.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use profcheck_core::{ConfigError, DocumentKind, InputFile, Strictness};
use regex::Regex;

/// How the next file argument will be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationMode {
    Explicit(DocumentKind),
    Sniff,
    Disabled,
}

/// Advisory notice produced during classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyWarning {
    /// Sniffing could not tell the kind from the path; profile was assumed.
    AssumedProfile { path: String },
}

impl fmt::Display for ClassifyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssumedProfile { path } => write!(
                f,
                "cannot tell the document kind of '{path}' from its path; assuming profiles"
            ),
        }
    }
}

/// Result of classifying a whole argument list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    /// Every file argument, in command-line order.
    pub files: Vec<InputFile>,
    pub strictness: Strictness,
    pub warnings: Vec<ClassifyWarning>,
}

impl Classification {
    /// Profile paths, in command-line order.
    pub fn profiles(&self) -> Vec<&str> {
        self.paths_of(DocumentKind::Profile)
    }

    /// Legacy paths, in command-line order.
    pub fn legacies(&self) -> Vec<&str> {
        self.paths_of(DocumentKind::Legacy)
    }

    /// Kinds that at least one file was classified as.
    pub fn kinds(&self) -> BTreeSet<DocumentKind> {
        self.files.iter().map(InputFile::kind).collect()
    }

    fn paths_of(&self, kind: DocumentKind) -> Vec<&str> {
        self.files
            .iter()
            .filter(|f| f.kind() == kind)
            .map(InputFile::path)
            .collect()
    }
}

/// Classify command-line tokens.
///
/// # Errors
///
/// - `ConfigError::UnknownFlag` for an unrecognised `--` token.
/// - `ConfigError::OrderViolation` if `--loose` follows a file argument.
/// - `ConfigError::Unclassified` for a file argument met while sniffing
///   is disabled and no explicit kind is in effect.
pub fn classify<I, S>(tokens: I) -> Result<Classification, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = Classifier::default();
    for token in tokens {
        state.accept(token.as_ref())?;
    }
    Ok(state.finish())
}

#[derive(Debug)]
struct Classifier {
    explicit: Option<DocumentKind>,
    sniff: bool,
    out: Classification,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            explicit: None,
            sniff: true,
            out: Classification::default(),
        }
    }
}

impl Classifier {
    fn mode(&self) -> ClassificationMode {
        match (self.explicit, self.sniff) {
            (Some(kind), _) => ClassificationMode::Explicit(kind),
            (None, true) => ClassificationMode::Sniff,
            (None, false) => ClassificationMode::Disabled,
        }
    }

    fn accept(&mut self, token: &str) -> Result<(), ConfigError> {
        if token.starts_with("--") {
            self.apply_flag(token)
        } else {
            self.classify_path(token)
        }
    }

    fn apply_flag(&mut self, flag: &str) -> Result<(), ConfigError> {
        match flag {
            "--profiles" => self.explicit = Some(DocumentKind::Profile),
            "--legacies" => self.explicit = Some(DocumentKind::Legacy),
            "--sniff" => {
                self.explicit = None;
                self.sniff = true;
            }
            "--nosniff" => self.sniff = false,
            "--loose" => {
                if let Some(first) = self.out.files.first() {
                    return Err(ConfigError::OrderViolation {
                        flag: flag.to_string(),
                        first_file: first.path().to_string(),
                    });
                }
                self.out.strictness = Strictness::Loose;
            }
            other => return Err(ConfigError::UnknownFlag(other.to_string())),
        }
        tracing::trace!(flag, mode = ?self.mode(), "mode switch");
        Ok(())
    }

    fn classify_path(&mut self, path: &str) -> Result<(), ConfigError> {
        let kind = match self.mode() {
            ClassificationMode::Explicit(kind) => kind,
            ClassificationMode::Sniff => sniff_kind(path).unwrap_or_else(|| {
                self.out.warnings.push(ClassifyWarning::AssumedProfile {
                    path: path.to_string(),
                });
                DocumentKind::Profile
            }),
            ClassificationMode::Disabled => {
                return Err(ConfigError::Unclassified(path.to_string()));
            }
        };
        self.out.files.push(InputFile::new(path, kind));
        Ok(())
    }

    fn finish(self) -> Classification {
        self.out
    }
}

fn kind_dir_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:^|/)(profiles|legacies)/[^/]+$")
            .unwrap_or_else(|e| unreachable!("kind directory pattern is a valid regex: {e}"))
    })
}

/// Infer a kind from the directory directly containing `path`.
pub fn sniff_kind(path: &str) -> Option<DocumentKind> {
    let normalized = path.replace('\\', "/");
    kind_dir_pattern()
        .captures(&normalized)
        .and_then(|caps| caps.get(1))
        .and_then(|dir| DocumentKind::from_dir_name(dir.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_both_kinds_without_warnings() {
        let c = classify(["profiles/a.yaml", "legacies/b.yaml"]).unwrap();
        assert_eq!(c.profiles(), ["profiles/a.yaml"]);
        assert_eq!(c.legacies(), ["legacies/b.yaml"]);
        assert!(c.warnings.is_empty());
        assert_eq!(c.strictness, Strictness::Tight);
    }

    #[test]
    fn unknown_path_defaults_to_profile_with_one_warning() {
        let c = classify(["weird.yaml"]).unwrap();
        assert_eq!(c.profiles(), ["weird.yaml"]);
        assert!(c.legacies().is_empty());
        assert_eq!(
            c.warnings,
            [ClassifyWarning::AssumedProfile {
                path: "weird.yaml".to_string()
            }]
        );
    }

    #[test]
    fn sniff_uses_innermost_directory() {
        assert_eq!(sniff_kind("repo/profiles/a.yaml"), Some(DocumentKind::Profile));
        assert_eq!(sniff_kind("/abs/legacies/b.yml"), Some(DocumentKind::Legacy));
        assert_eq!(sniff_kind("profiles/nested/a.yaml"), None);
        assert_eq!(sniff_kind("myprofiles/a.yaml"), None);
        assert_eq!(sniff_kind("profiles/"), None);
        assert_eq!(sniff_kind("profiles"), None);
    }

    #[test]
    fn sniff_normalises_backslashes() {
        assert_eq!(sniff_kind(r"C:\repo\legacies\b.yaml"), Some(DocumentKind::Legacy));
        let c = classify([r"profiles\a.yaml"]).unwrap();
        assert_eq!(c.profiles(), [r"profiles\a.yaml"]);
        assert!(c.warnings.is_empty());
    }

    #[test]
    fn explicit_mode_overrides_sniffing() {
        let c = classify(["--legacies", "profiles/a.yaml", "x.yaml"]).unwrap();
        assert_eq!(c.legacies(), ["profiles/a.yaml", "x.yaml"]);
        assert!(c.warnings.is_empty());
    }

    #[test]
    fn modes_switch_for_subsequent_arguments_only() {
        let c = classify([
            "legacies/a.yaml",
            "--profiles",
            "legacies/b.yaml",
            "--sniff",
            "legacies/c.yaml",
        ])
        .unwrap();
        assert_eq!(c.legacies(), ["legacies/a.yaml", "legacies/c.yaml"]);
        assert_eq!(c.profiles(), ["legacies/b.yaml"]);
    }

    #[test]
    fn order_is_preserved_within_groups_and_overall() {
        let c = classify(["profiles/z.yaml", "legacies/y.yaml", "profiles/a.yaml"]).unwrap();
        assert_eq!(c.profiles(), ["profiles/z.yaml", "profiles/a.yaml"]);
        let all: Vec<&str> = c.files.iter().map(InputFile::path).collect();
        assert_eq!(all, ["profiles/z.yaml", "legacies/y.yaml", "profiles/a.yaml"]);
    }

    #[test]
    fn nosniff_without_explicit_kind_is_fatal() {
        let err = classify(["profiles/a.yaml", "--nosniff", "profiles/b.yaml"]).unwrap_err();
        assert_eq!(err, ConfigError::Unclassified("profiles/b.yaml".to_string()));
    }

    #[test]
    fn nosniff_keeps_explicit_kind() {
        let c = classify(["--legacies", "--nosniff", "profiles/a.yaml"]).unwrap();
        assert_eq!(c.legacies(), ["profiles/a.yaml"]);
    }

    #[test]
    fn sniff_after_nosniff_restores_inference() {
        let c = classify(["--nosniff", "--sniff", "legacies/a.yaml"]).unwrap();
        assert_eq!(c.legacies(), ["legacies/a.yaml"]);
    }

    #[test]
    fn explicit_then_sniff_then_nosniff_is_disabled() {
        let err = classify(["--profiles", "--sniff", "--nosniff", "a.yaml"]).unwrap_err();
        assert!(matches!(err, ConfigError::Unclassified(_)));
    }

    #[test]
    fn loose_before_files_sets_strictness() {
        let c = classify(["--loose", "--loose", "profiles/a.yaml"]).unwrap();
        assert_eq!(c.strictness, Strictness::Loose);
    }

    #[test]
    fn loose_after_file_is_order_violation() {
        let err = classify(["profiles/a.yaml", "--loose"]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::OrderViolation {
                flag: "--loose".to_string(),
                first_file: "profiles/a.yaml".to_string(),
            }
        );
    }

    #[test]
    fn unknown_flag_is_fatal() {
        let err = classify(["profiles/a.yaml", "--strict"]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownFlag("--strict".to_string()));
    }

    #[test]
    fn single_dash_tokens_are_paths() {
        let c = classify(["-"]).unwrap();
        assert_eq!(c.profiles(), ["-"]);
        assert_eq!(c.warnings.len(), 1);
    }

    #[test]
    fn kinds_lists_only_used_kinds() {
        assert!(classify(Vec::<String>::new()).unwrap().kinds().is_empty());
        let c = classify(["legacies/a.yaml", "legacies/b.yaml"]).unwrap();
        assert_eq!(c.kinds().into_iter().collect::<Vec<_>>(), [DocumentKind::Legacy]);
    }
}

//! # Document Kinds
//!
//! A document's kind decides which schema it is validated against. Kinds
//! are assigned by the classifier before any file is read and never change
//! afterwards.

use std::fmt;

/// The two recognised document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {
    /// Documents under a `profiles/` directory.
    Profile,
    /// Documents under a `legacies/` directory.
    Legacy,
}

impl DocumentKind {
    /// All kinds, in reporting order.
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Profile, DocumentKind::Legacy];

    /// Plural name used for directories, flags, and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profiles",
            Self::Legacy => "legacies",
        }
    }

    /// File name of this kind's schema inside a schema-version directory.
    pub fn schema_file_name(&self) -> &'static str {
        match self {
            Self::Profile => "profiles.json",
            Self::Legacy => "legacies.json",
        }
    }

    /// Look up a kind by the name of the directory a document sits in.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        match name {
            "profiles" => Some(Self::Profile),
            "legacies" => Some(Self::Legacy),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether object schemas are tightened before compilation.
///
/// Fixed for a whole run. `Tight` is the default; `--loose` selects
/// `Loose` and must appear before any file argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Object schemas that list `properties` reject anything unlisted.
    #[default]
    Tight,
    /// Schemas are compiled exactly as written.
    Loose,
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tight => f.write_str("tight"),
            Self::Loose => f.write_str("loose"),
        }
    }
}

/// A file argument together with the kind it was classified as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    path: String,
    kind: DocumentKind,
}

impl InputFile {
    /// Bind a path (kept exactly as given on the command line) to a kind.
    pub fn new(path: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// The path as given, used verbatim in reports.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_match_directories_and_schema_files() {
        assert_eq!(DocumentKind::Profile.as_str(), "profiles");
        assert_eq!(DocumentKind::Legacy.as_str(), "legacies");
        assert_eq!(DocumentKind::Profile.schema_file_name(), "profiles.json");
        assert_eq!(DocumentKind::Legacy.schema_file_name(), "legacies.json");
    }

    #[test]
    fn from_dir_name_is_exact() {
        assert_eq!(DocumentKind::from_dir_name("profiles"), Some(DocumentKind::Profile));
        assert_eq!(DocumentKind::from_dir_name("legacies"), Some(DocumentKind::Legacy));
        assert_eq!(DocumentKind::from_dir_name("Profiles"), None);
        assert_eq!(DocumentKind::from_dir_name("profile"), None);
    }

    #[test]
    fn strictness_defaults_to_tight() {
        assert_eq!(Strictness::default(), Strictness::Tight);
    }


    #[test]
    fn input_file_keeps_path_verbatim() {
        let file = InputFile::new("profiles\\a.yaml", DocumentKind::Profile);
        assert_eq!(file.path(), "profiles\\a.yaml");
        assert_eq!(file.kind(), DocumentKind::Profile);
    }
}

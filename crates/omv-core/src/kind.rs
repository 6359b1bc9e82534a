//! # Schema Kinds: Recognized Metadata Files
//!
//! Defines the `SchemaKind` enum and the fixed table mapping each accepted
//! metadata filename to the schema that validates it. This table is the ONE
//! definition used across the pipeline: discovery probes exactly these
//! names, and validation selects its schema from the same variant.
//!
//! | Filename | Kind | Schema file |
//! |----------|------|-------------|
//! | `chapter.owasp.yaml` | `chapter` | `chapter.schema.json` |
//! | `committee.owasp.yaml` | `committee` | `committee.schema.json` |
//! | `project.owasp.yaml` | `project` | `project.schema.json` |

use std::str::FromStr;

use crate::error::ValidatorError;

/// The document kinds this validator understands.
///
/// Each kind corresponds to exactly one recognized filename and one schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaKind {
    /// An OWASP chapter (local community group).
    Chapter,
    /// An OWASP committee.
    Committee,
    /// An OWASP project.
    Project,
}

impl SchemaKind {
    /// Returns every kind, ordered by filename.
    pub fn all() -> &'static [SchemaKind] {
        &[Self::Chapter, Self::Committee, Self::Project]
    }

    /// Returns the schema identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chapter => "chapter",
            Self::Committee => "committee",
            Self::Project => "project",
        }
    }

    /// Returns the metadata filename that selects this kind.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Chapter => "chapter.owasp.yaml",
            Self::Committee => "committee.owasp.yaml",
            Self::Project => "project.owasp.yaml",
        }
    }

    /// Returns the filename of the JSON schema that validates this kind.
    pub fn schema_file(&self) -> &'static str {
        match self {
            Self::Chapter => "chapter.schema.json",
            Self::Committee => "committee.schema.json",
            Self::Project => "project.schema.json",
        }
    }

    /// Look up the kind selected by a metadata filename.
    ///
    /// Matching is exact and case-sensitive; unrecognized names return `None`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.file_name() == name)
    }
}

/// The accepted metadata filenames, in table order.
pub fn accepted_file_names() -> Vec<&'static str> {
    SchemaKind::all().iter().map(SchemaKind::file_name).collect()
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chapter" => Ok(Self::Chapter),
            "committee" => Ok(Self::Committee),
            "project" => Ok(Self::Project),
            other => Err(ValidatorError::SchemaNotFound {
                kind: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_expected_size() {
        assert_eq!(SchemaKind::all().len(), 3);
        assert_eq!(accepted_file_names().len(), 3);
    }

    #[test]
    fn file_names_are_unique_and_sorted() {
        let names = accepted_file_names();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn from_file_name_resolves_every_kind() {
        for kind in SchemaKind::all() {
            assert_eq!(SchemaKind::from_file_name(kind.file_name()), Some(*kind));
        }
    }

    #[test]
    fn from_file_name_rejects_unknown_names() {
        assert_eq!(SchemaKind::from_file_name("README.md"), None);
        assert_eq!(SchemaKind::from_file_name("Project.owasp.yaml"), None);
        assert_eq!(SchemaKind::from_file_name("project.owasp.yml"), None);
        assert_eq!(SchemaKind::from_file_name(""), None);
    }

    #[test]
    fn project_maps_to_project_schema() {
        let kind = SchemaKind::from_file_name("project.owasp.yaml").unwrap();
        assert_eq!(kind, SchemaKind::Project);
        assert_eq!(kind.schema_file(), "project.schema.json");
    }

    #[test]
    fn as_str_roundtrip() {
        for kind in SchemaKind::all() {
            let parsed: SchemaKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn from_str_unknown_is_schema_not_found() {
        let err = "event".parse::<SchemaKind>().unwrap_err();
        assert!(matches!(err, ValidatorError::SchemaNotFound { ref kind } if kind == "event"));
        assert!("PROJECT".parse::<SchemaKind>().is_err());
    }

    #[test]
    fn display_matches_as_str() {
        for kind in SchemaKind::all() {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}

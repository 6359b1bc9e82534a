//! # Error Types: Pipeline Error Taxonomy
//!
//! Every failure of a validation run is terminal: the inputs are a fixed
//! filesystem state that will not change within the run, so nothing is
//! retried. Each variant renders the text that follows the `ERROR: `
//! prefix in the report, and every variant maps to exit code 1.

use thiserror::Error;

use crate::kind::accepted_file_names;

/// Terminal failure of a validation run.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// The workspace root is missing, not a directory, or unreadable.
    #[error("Workspace '{path}' is not accessible: {reason}")]
    WorkspaceUnavailable {
        /// Workspace root as configured.
        path: String,
        /// Underlying cause.
        reason: String,
    },

    /// No recognized metadata file is present in the workspace root.
    #[error("OWASP metadata file not found. Expected one of: {}", accepted_file_names().join(", "))]
    NotFound,

    /// An explicitly requested file does not exist.
    #[error("File {path} does not exist.")]
    FileMissing {
        /// The requested path.
        path: String,
    },

    /// Two or more recognized metadata files are present.
    #[error("Found multiple OWASP metadata files: {}", .found.join(", "))]
    MultipleFound {
        /// Every recognized filename present, sorted.
        found: Vec<String>,
    },

    /// An explicitly requested file does not have a recognized name.
    #[error("File {file} is not a valid schema file.")]
    UnrecognizedFile {
        /// Base name of the requested file.
        file: String,
    },

    /// The metadata file could not be read or is not well-formed YAML.
    #[error("Could not load '{file}': {reason}")]
    LoadError {
        /// Metadata filename.
        file: String,
        /// Underlying I/O or parser message.
        reason: String,
    },

    /// No schema is available for the selected kind.
    #[error("Schema not found for kind '{kind}'")]
    SchemaNotFound {
        /// The schema kind identifier.
        kind: String,
    },

    /// A schema exists but could not be loaded or compiled.
    #[error("Schema '{schema}' is unusable: {reason}")]
    SchemaUnusable {
        /// Schema file or identifier.
        schema: String,
        /// Underlying cause.
        reason: String,
    },

    /// The document does not conform to its schema.
    #[error("Validation failed! {message}")]
    ValidationFailed {
        /// Metadata filename.
        file: String,
        /// The canonical violation message.
        message: String,
        /// Total number of violations found.
        violation_count: usize,
    },
}

impl ValidatorError {
    /// Short, stable name of the failure kind, used as a log field.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::WorkspaceUnavailable { .. } => "workspace_unavailable",
            Self::NotFound | Self::FileMissing { .. } => "not_found",
            Self::MultipleFound { .. } => "multiple_found",
            Self::UnrecognizedFile { .. } => "unrecognized_file",
            Self::LoadError { .. } => "load_error",
            Self::SchemaNotFound { .. } => "schema_not_found",
            Self::SchemaUnusable { .. } => "schema_unusable",
            Self::ValidationFailed { .. } => "validation_failed",
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

//! # Reporting
//!
//! Turns a pipeline outcome into process-visible signals: exactly one line
//! on exactly one stream, and an exit code.
//!
//! - Success: `SUCCESS: Validation passed!` on stdout, exit 0.
//! - Failure: `ERROR: <description>` on stderr, exit 1.

use std::io::{self, Write};

use omv_core::ValidatorError;

use crate::discovery::Discovered;

/// Line written to stdout on success.
pub const SUCCESS_BANNER: &str = "SUCCESS: Validation passed!";

/// Prefix of the line written to stderr on failure.
pub const ERROR_PREFIX: &str = "ERROR: ";

/// Exit code for a valid document.
pub const EXIT_SUCCESS: u8 = 0;

/// Write the report for `outcome` and return the exit code.
///
/// # Errors
///
/// Returns the I/O error if the selected stream cannot be written.
pub fn write_report<O: Write, E: Write>(
    outcome: &Result<Discovered, ValidatorError>,
    out: &mut O,
    err: &mut E,
) -> io::Result<u8> {
    match outcome {
        Ok(_) => {
            writeln!(out, "{SUCCESS_BANNER}")?;
            out.flush()?;
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            if let ValidatorError::ValidationFailed {
                file,
                violation_count,
                ..
            } = e
            {
                tracing::info!(file = %file, violation_count, "document has schema violations");
            }
            tracing::info!(kind = e.kind_name(), "validation run failed");
            writeln!(err, "{ERROR_PREFIX}{e}")?;
            err.flush()?;
            Ok(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omv_core::SchemaKind;
    use std::path::PathBuf;

    fn report(outcome: Result<Discovered, ValidatorError>) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = write_report(&outcome, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn success_writes_only_stdout() {
        let (code, out, err) = report(Ok(Discovered {
            path: PathBuf::from("/ws/project.owasp.yaml"),
            file_name: "project.owasp.yaml",
            kind: SchemaKind::Project,
        }));
        assert_eq!(code, 0);
        assert_eq!(out, "SUCCESS: Validation passed!\n");
        assert!(err.is_empty());
    }

    #[test]
    fn failure_writes_only_stderr() {
        let (code, out, err) = report(Err(ValidatorError::NotFound));
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.starts_with("ERROR: OWASP metadata file not found."));
        assert_eq!(err.lines().count(), 1);
    }

    #[test]
    fn validation_failure_line() {
        let (code, _, err) = report(Err(ValidatorError::ValidationFailed {
            file: "committee.owasp.yaml".into(),
            message: "/community: [] should be non-empty".into(),
            violation_count: 1,
        }));
        assert_eq!(code, 1);
        assert_eq!(
            err,
            "ERROR: Validation failed! /community: [] should be non-empty\n"
        );
    }
}

//! # Discovery
//!
//! Locates the single recognized metadata file directly under the workspace
//! root. Only the fixed names of [`SchemaKind`] are probed: there is no
//! recursion and no globbing, and any other file is ignored.

use std::io;
use std::path::{Path, PathBuf};

use omv_core::{SchemaKind, ValidatorError};

/// A metadata file selected for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    /// Full path to the file.
    pub path: PathBuf,
    /// The recognized filename.
    pub file_name: &'static str,
    /// The schema kind the filename selects.
    pub kind: SchemaKind,
}

/// Check that the workspace root is a readable directory.
///
/// # Errors
///
/// Returns [`ValidatorError::WorkspaceUnavailable`] if the root is missing,
/// is not a directory, or cannot be listed.
pub fn check_workspace(root: &Path) -> Result<(), ValidatorError> {
    let unavailable = |reason: String| ValidatorError::WorkspaceUnavailable {
        path: root.display().to_string(),
        reason,
    };

    let metadata = std::fs::metadata(root).map_err(|e| unavailable(e.to_string()))?;
    if !metadata.is_dir() {
        return Err(unavailable("not a directory".to_string()));
    }
    std::fs::read_dir(root).map_err(|e| unavailable(e.to_string()))?;
    Ok(())
}

/// Stat a candidate path. Only a not-found error means "absent".
fn is_regular_file(path: &Path) -> io::Result<bool> {
    match std::fs::metadata(path) {
        Ok(m) => Ok(m.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Find the one recognized metadata file directly under `root`.
///
/// # Errors
///
/// Returns [`ValidatorError::NotFound`] when no recognized file is present
/// and [`ValidatorError::MultipleFound`] when more than one is. A candidate
/// that exists but cannot be inspected makes the workspace
/// [`ValidatorError::WorkspaceUnavailable`].
pub fn discover(root: &Path) -> Result<Discovered, ValidatorError> {
    let mut found = Vec::new();
    for kind in SchemaKind::all() {
        let path = root.join(kind.file_name());
        let present = is_regular_file(&path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "cannot stat candidate");
            ValidatorError::WorkspaceUnavailable {
                path: root.display().to_string(),
                reason: format!("cannot inspect {}: {e}", kind.file_name()),
            }
        })?;
        if present {
            found.push(Discovered {
                path,
                file_name: kind.file_name(),
                kind: *kind,
            });
        }
    }

    tracing::debug!(
        root = %root.display(),
        matches = found.len(),
        "scanned workspace for metadata files"
    );

    match found.len() {
        0 => Err(ValidatorError::NotFound),
        1 => Ok(found.remove(0)),
        _ => Err(ValidatorError::MultipleFound {
            found: found.iter().map(|d| d.file_name.to_string()).collect(),
        }),
    }
}

/// Resolve an explicitly configured metadata file.
///
/// # Errors
///
/// Returns [`ValidatorError::FileMissing`] if `path` does not exist or is
/// not a regular file, [`ValidatorError::LoadError`] if it cannot be
/// inspected, and [`ValidatorError::UnrecognizedFile`] if its name is not
/// a recognized metadata filename.
pub fn resolve_explicit(path: &Path) -> Result<Discovered, ValidatorError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let present = is_regular_file(path).map_err(|e| ValidatorError::LoadError {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    if !present {
        return Err(ValidatorError::FileMissing {
            path: path.display().to_string(),
        });
    }

    let kind = SchemaKind::from_file_name(&name)
        .ok_or(ValidatorError::UnrecognizedFile { file: name })?;

    Ok(Discovered {
        path: path.to_path_buf(),
        file_name: kind.file_name(),
        kind,
    })
}

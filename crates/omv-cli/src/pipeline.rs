//! # Validation Pipeline
//!
//! Discovery, loading, and validation composed in sequence. The first
//! failing stage ends the run; nothing is retried.

use omv_core::{Document, ValidatorError};
use omv_schema::{load_document, SchemaStore};

use crate::config::Config;
use crate::discovery::{self, Discovered};

/// Select the metadata file to validate.
///
/// An explicit file bypasses discovery; otherwise the workspace root is
/// checked and scanned.
///
/// # Errors
///
/// Returns the discovery failure (`WorkspaceUnavailable`, `NotFound`,
/// `FileMissing`, `MultipleFound`, or `UnrecognizedFile`), or `LoadError`
/// when an explicit file cannot be inspected.
pub fn select_target(config: &Config) -> Result<Discovered, ValidatorError> {
    match &config.file {
        Some(path) => discovery::resolve_explicit(path),
        None => {
            discovery::check_workspace(&config.workspace)?;
            discovery::discover(&config.workspace)
        }
    }
}

/// Load the selected file.
///
/// A file that vanished or became unreadable after discovery is a
/// `LoadError`, like malformed YAML.
///
/// # Errors
///
/// Returns [`ValidatorError::LoadError`].
pub fn load_target(target: &Discovered) -> Result<Document, ValidatorError> {
    load_document(&target.path).map_err(|e| e.into_validator_error(target.file_name))
}

/// Open the schema store the configuration asks for.
///
/// # Errors
///
/// Returns [`ValidatorError::SchemaUnusable`] if the schemas cannot be loaded.
pub fn open_store(config: &Config) -> Result<SchemaStore, ValidatorError> {
    let store = match &config.schema_dir {
        Some(dir) => SchemaStore::from_dir(dir),
        None => SchemaStore::builtin(),
    };
    store.map_err(|e| e.into_validator_error(""))
}

/// Run discovery, loading, and validation.
///
/// Returns the validated file on success.
///
/// # Errors
///
/// Returns the first stage failure as a [`ValidatorError`].
pub fn run_pipeline(config: &Config) -> Result<Discovered, ValidatorError> {
    let target = select_target(config)?;
    tracing::info!(
        file = target.file_name,
        kind = %target.kind,
        "found metadata file, validating against schema"
    );

    let document = load_target(&target)?;
    if document.is_empty() {
        tracing::debug!(file = target.file_name, "metadata file holds no data");
    }

    let store = open_store(config)?;
    tracing::debug!(source = %store.source(), schemas = store.schema_count(), "opened schema store");

    store
        .validate_document(target.kind, &document)
        .map_err(|e| e.into_validator_error(target.file_name))?;

    tracing::info!(file = target.file_name, "validation passed");
    Ok(target)
}

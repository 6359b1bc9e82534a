//! # Schema Store
//!
//! Holds the JSON schemas for every [`SchemaKind`] and compiles validators
//! on demand.
//!
//! ## Schema Resolution
//!
//! All schemas use `$id` URIs of the form:
//!   `https://schemas.owasp.org/metadata/<filename>`
//!
//! The kind schemas reference shared definitions in `common.schema.json`
//! through relative `$ref`s. A local retriever maps those URIs back to the
//! loaded schemas by filename, so compilation never touches the network.
//! A `$ref` to a schema that is not loaded fails compilation instead of
//! being silently accepted.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

use omv_core::{SchemaKind, ValidatorError};

use crate::validate::ValidationViolations;

/// URI prefix shared by every schema in the built-in set.
pub const SCHEMA_URI_PREFIX: &str = "https://schemas.owasp.org/metadata/";

/// Filename of the shared definitions schema.
pub const COMMON_SCHEMA_FILE: &str = "common.schema.json";

const BUILTIN_SCHEMAS: &[(&str, &str)] = &[
    (
        COMMON_SCHEMA_FILE,
        include_str!("../schemas/common.schema.json"),
    ),
    (
        "chapter.schema.json",
        include_str!("../schemas/chapter.schema.json"),
    ),
    (
        "committee.schema.json",
        include_str!("../schemas/committee.schema.json"),
    ),
    (
        "project.schema.json",
        include_str!("../schemas/project.schema.json"),
    ),
];

/// Errors raised by the schema store, the loader, and validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// No schema is loaded for the requested kind.
    #[error("schema not found for kind '{kind}' in {source_desc}")]
    SchemaNotFound {
        /// The requested kind.
        kind: SchemaKind,
        /// Where the store was loaded from.
        source_desc: String,
    },

    /// A schema file could not be read or parsed.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoad {
        /// Schema filename or directory.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The schema could not be compiled into a validator.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuild {
        /// Schema filename.
        schema_name: String,
        /// Reason compilation failed.
        reason: String,
    },

    /// The metadata document could not be read or parsed.
    #[error("{reason}")]
    DocumentLoad {
        /// Path to the document.
        path: String,
        /// Underlying I/O or parser message.
        reason: String,
    },

    /// The document does not conform to the schema.
    #[error("validation failed against '{kind}' schema: {violations}")]
    ValidationFailed {
        /// Kind whose schema was applied.
        kind: SchemaKind,
        /// All violations, canonical one first.
        violations: ValidationViolations,
    },
}

impl SchemaError {
    /// Convert into the pipeline taxonomy, attributing it to `file`.
    pub fn into_validator_error(self, file: &str) -> ValidatorError {
        match self {
            Self::SchemaNotFound { kind, .. } => ValidatorError::SchemaNotFound {
                kind: kind.to_string(),
            },
            Self::SchemaLoad {
                schema_name,
                reason,
            }
            | Self::ValidatorBuild {
                schema_name,
                reason,
            } => ValidatorError::SchemaUnusable {
                schema: schema_name,
                reason,
            },
            Self::DocumentLoad { reason, .. } => ValidatorError::LoadError {
                file: file.to_string(),
                reason,
            },
            Self::ValidationFailed { violations, .. } => ValidatorError::ValidationFailed {
                file: file.to_string(),
                message: violations.message(),
                violation_count: violations.len(),
            },
        }
    }
}

/// Where a [`SchemaStore`] got its schemas from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// The schemas compiled into this binary.
    Builtin,
    /// A directory of `*.schema.json` files.
    Directory(PathBuf),
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("built-in schemas"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Resolves `$ref` URIs to schemas already held in memory.
struct LocalSchemaRetriever {
    /// Map from URI or bare filename to schema value.
    schemas_by_uri: BTreeMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        Err(format!("schema '{uri_str}' is not available locally").into())
    }
}

/// The schema store, addressed by [`SchemaKind`].
///
/// Schemas are immutable once loaded. Validators are compiled per call.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    source: SchemaSource,
    /// Map from schema filename (e.g. `"project.schema.json"`) to parsed JSON.
    schemas: BTreeMap<String, Value>,
}

impl SchemaStore {
    /// The store holding the schemas embedded at build time.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaLoad`] if an embedded schema is not valid
    /// JSON.
    pub fn builtin() -> Result<Self, SchemaError> {
        let mut schemas = BTreeMap::new();
        for (name, text) in BUILTIN_SCHEMAS {
            let value: Value =
                serde_json::from_str(text).map_err(|e| SchemaError::SchemaLoad {
                    schema_name: (*name).to_string(),
                    reason: format!("invalid JSON: {e}"),
                })?;
            schemas.insert((*name).to_string(), value);
        }
        Ok(Self {
            source: SchemaSource::Builtin,
            schemas,
        })
    }

    /// Load every `*.schema.json` file in `schema_dir`.
    ///
    /// Kinds whose schema file is absent are not an error here; asking for
    /// them later yields [`SchemaError::SchemaNotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaLoad`] if the directory cannot be read or
    /// any schema file cannot be read or parsed as JSON.
    pub fn from_dir(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let load_err = |name: String, reason: String| SchemaError::SchemaLoad {
            schema_name: name,
            reason,
        };

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| {
            load_err(
                schema_dir.display().to_string(),
                format!("cannot read schema directory: {e}"),
            )
        })?;

        let mut schemas = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                load_err(
                    schema_dir.display().to_string(),
                    format!("cannot read directory entry: {e}"),
                )
            })?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".schema.json") {
                continue;
            }
            let content = std::fs::read_to_string(&path)
                .map_err(|e| load_err(name.to_string(), format!("cannot read file: {e}")))?;
            let value: Value = serde_json::from_str(&content)
                .map_err(|e| load_err(name.to_string(), format!("invalid JSON: {e}")))?;
            schemas.insert(name.to_string(), value);
        }

        tracing::debug!(
            dir = %schema_dir.display(),
            count = schemas.len(),
            "loaded schema directory"
        );

        Ok(Self {
            source: SchemaSource::Directory(schema_dir),
            schemas,
        })
    }

    /// Where this store's schemas came from.
    pub fn source(&self) -> &SchemaSource {
        &self.source
    }

    /// Returns the number of loaded schemas, shared definitions included.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Returns the names of all loaded schemas, sorted.
    pub fn schema_names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Look up the schema for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaNotFound`] if no schema is loaded for it.
    pub fn get_schema(&self, kind: SchemaKind) -> Result<&Value, SchemaError> {
        self.schemas
            .get(kind.schema_file())
            .ok_or_else(|| SchemaError::SchemaNotFound {
                kind,
                source_desc: self.source.to_string(),
            })
    }

    fn retriever(&self) -> LocalSchemaRetriever {
        let mut schemas_by_uri = BTreeMap::new();
        for (filename, value) in &self.schemas {
            schemas_by_uri.insert(format!("{SCHEMA_URI_PREFIX}{filename}"), value.clone());
            if let Some(id) = value.get("$id").and_then(Value::as_str) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.clone(), value.clone());
        }
        LocalSchemaRetriever { schemas_by_uri }
    }

    /// Compile a validator for `kind`, with format assertion enabled.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaNotFound`] if the schema is missing and
    /// [`SchemaError::ValidatorBuild`] if it does not compile (including an
    /// unresolvable `$ref`).
    pub fn build_validator(&self, kind: SchemaKind) -> Result<Validator, SchemaError> {
        let schema = self.get_schema(kind)?;
        jsonschema::options()
            .with_draft(jsonschema::Draft::Draft7)
            .should_validate_formats(true)
            .with_retriever(self.retriever())
            .build(schema)
            .map_err(|e| SchemaError::ValidatorBuild {
                schema_name: kind.schema_file().to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_schema(dir: &Path, name: &str, value: &Value) {
        std::fs::write(dir.join(name), serde_json::to_vec_pretty(value).unwrap()).unwrap();
    }

    #[test]
    fn builtin_loads_every_kind() {
        let store = SchemaStore::builtin().unwrap();
        assert_eq!(store.source(), &SchemaSource::Builtin);
        assert_eq!(store.schema_count(), 4);
        for kind in SchemaKind::all() {
            let schema = store.get_schema(*kind).unwrap();
            assert_eq!(schema["type"], "object", "{kind} schema must describe an object");
        }
    }

    #[test]
    fn builtin_schema_ids_use_canonical_prefix() {
        let store = SchemaStore::builtin().unwrap();
        for name in store.schema_names() {
            let id = store.schemas[name]["$id"].as_str().unwrap();
            assert_eq!(id, format!("{SCHEMA_URI_PREFIX}{name}"));
        }
    }

    #[test]
    fn all_builtin_schemas_compile() {
        let store = SchemaStore::builtin().unwrap();
        let mut failures = Vec::new();
        for kind in SchemaKind::all() {
            if let Err(e) = store.build_validator(*kind) {
                failures.push(format!("{kind}: {e}"));
            }
        }
        assert!(failures.is_empty(), "{}", failures.join("\n"));
    }

    #[test]
    fn from_dir_loads_only_schema_files() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(dir.path(), "project.schema.json", &json!({"type": "object"}));
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();
        std::fs::write(dir.path().join("project.json"), b"{}").unwrap();

        let store = SchemaStore::from_dir(dir.path()).unwrap();
        assert_eq!(store.schema_names(), vec!["project.schema.json"]);
        assert_eq!(
            store.source(),
            &SchemaSource::Directory(dir.path().to_path_buf())
        );
    }

    #[test]
    fn from_dir_missing_kind_is_schema_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(dir.path(), "project.schema.json", &json!({"type": "object"}));

        let store = SchemaStore::from_dir(dir.path()).unwrap();
        let err = store.get_schema(SchemaKind::Chapter).unwrap_err();
        assert!(
            matches!(err, SchemaError::SchemaNotFound { kind: SchemaKind::Chapter, .. }),
            "Expected SchemaNotFound, got: {err}"
        );
        let pipeline = err.into_validator_error("chapter.owasp.yaml");
        assert_eq!(pipeline.to_string(), "Schema not found for kind 'chapter'");
    }

    #[test]
    fn from_dir_nonexistent_is_load_error() {
        let err = SchemaStore::from_dir("/tmp/omv-test-no-such-schema-dir").unwrap_err();
        assert!(matches!(err, SchemaError::SchemaLoad { .. }), "got: {err}");
    }

    #[test]
    fn from_dir_invalid_json_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chapter.schema.json"), b"{ not json").unwrap();

        let err = SchemaStore::from_dir(dir.path()).unwrap_err();
        match err {
            SchemaError::SchemaLoad { schema_name, reason } => {
                assert_eq!(schema_name, "chapter.schema.json");
                assert!(reason.contains("invalid JSON"));
            }
            other => panic!("Expected SchemaLoad, got: {other}"),
        }
    }

    #[test]
    fn unresolvable_ref_fails_to_build() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(
            dir.path(),
            "committee.schema.json",
            &json!({
                "$id": "https://schemas.owasp.org/metadata/committee.schema.json",
                "type": "object",
                "properties": {
                    "leaders": { "$ref": "missing.schema.json#/definitions/leaders" }
                }
            }),
        );

        let store = SchemaStore::from_dir(dir.path()).unwrap();
        let err = store.build_validator(SchemaKind::Committee).unwrap_err();
        assert!(matches!(err, SchemaError::ValidatorBuild { .. }), "got: {err}");
    }

    #[test]
    fn cross_schema_refs_resolve_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(
            dir.path(),
            "common.schema.json",
            &json!({
                "$id": "https://schemas.owasp.org/metadata/common.schema.json",
                "definitions": { "name": { "type": "string" } }
            }),
        );
        write_schema(
            dir.path(),
            "chapter.schema.json",
            &json!({
                "$id": "https://schemas.owasp.org/metadata/chapter.schema.json",
                "type": "object",
                "properties": {
                    "name": { "$ref": "common.schema.json#/definitions/name" }
                }
            }),
        );

        let store = SchemaStore::from_dir(dir.path()).unwrap();
        let validator = store.build_validator(SchemaKind::Chapter).unwrap();
        assert!(validator.is_valid(&json!({"name": "OWASP London"})));
        assert!(!validator.is_valid(&json!({"name": 7})));
    }
}

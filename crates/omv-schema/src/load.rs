//! # Document Loading
//!
//! Reads a metadata file and parses it as YAML into a [`Document`].
//!
//! Input with no YAML content (empty, whitespace, comments, bare document
//! markers, or an explicit `null`) loads as [`Document::Empty`]. Only
//! genuinely malformed YAML and filesystem failures are load errors.

use std::path::Path;

use serde_json::Value;

use omv_core::Document;

use crate::store::SchemaError;

/// Read and parse the metadata file at `path`.
///
/// # Errors
///
/// Returns [`SchemaError::DocumentLoad`] if the file cannot be read
/// (missing, permission denied, not UTF-8) or is not well-formed YAML.
pub fn load_document(path: &Path) -> Result<Document, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::DocumentLoad {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;

    parse_document(&content).map_err(|e| match e {
        SchemaError::DocumentLoad { reason, .. } => SchemaError::DocumentLoad {
            path: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

/// Parse YAML text into a [`Document`].
///
/// # Errors
///
/// Returns [`SchemaError::DocumentLoad`] on malformed YAML, on input holding
/// more than one YAML document, or on values with no JSON equivalent.
pub fn parse_document(text: &str) -> Result<Document, SchemaError> {
    let load_err = |reason: String| SchemaError::DocumentLoad {
        path: String::new(),
        reason,
    };

    if !has_yaml_content(text) {
        return Ok(Document::Empty);
    }

    let yaml_value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| load_err(format!("invalid YAML: {e}")))?;

    let json_value = yaml_to_json_value(&yaml_value)
        .map_err(|e| load_err(format!("YAML-to-JSON conversion failed: {e}")))?;

    Ok(Document::from_value(json_value))
}

/// True if any line carries YAML content beyond comments and document markers.
fn has_yaml_content(text: &str) -> bool {
    text.trim_start_matches('\u{feff}').lines().any(|line| {
        let line = line.trim();
        !(line.is_empty() || line.starts_with('#') || line == "---" || line == "...")
    })
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Metadata files use only the JSON-compatible subset of YAML. Scalar map
/// keys are stringified; tags are dropped in favor of the tagged value.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                // .inf and .nan have no JSON number; keep them as text so the
                // schema rejects them.
                Ok(serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(non_finite_name(f).to_string())))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

fn non_finite_name(f: f64) -> &'static str {
    if f.is_nan() {
        "nan"
    } else if f.is_sign_negative() {
        "-inf"
    } else {
        "inf"
    }
}

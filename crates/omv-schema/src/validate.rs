//! # Schema Validation
//!
//! Applies a kind's schema to a [`Document`] and reduces the result to
//! "valid" or one canonical violation.
//!
//! Every violation is collected, then ordered shallowest-first by instance
//! path depth, with ties broken by instance path and then message text.
//! The first violation in that order is the one reported, so the same
//! document always yields the same message.

use std::fmt;

use jsonschema::Validator;
use serde_json::Value;

use omv_core::{Document, SchemaKind};

use crate::message::describe;
use crate::store::{SchemaError, SchemaStore};

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value; empty for the document root.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// Conventional description of the violation.
    pub message: String,
}

impl Violation {
    fn depth(&self) -> usize {
        self.instance_path.matches('/').count()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Every violation found in one document, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    fn new(mut violations: Vec<Violation>) -> Self {
        violations.sort_by(|a, b| {
            a.depth()
                .cmp(&b.depth())
                .then_with(|| a.instance_path.cmp(&b.instance_path))
                .then_with(|| a.message.cmp(&b.message))
        });
        violations.dedup();
        Self { violations }
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The canonical (reported) violation.
    pub fn primary(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// The canonical violation rendered for the report.
    pub fn message(&self) -> String {
        self.primary().map(Violation::to_string).unwrap_or_default()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Validate `instance` with a compiled validator.
///
/// Pure: returns `None` when the instance is valid, otherwise every
/// violation in canonical order.
pub fn validate_value(validator: &Validator, instance: &Value) -> Option<ValidationViolations> {
    let violations: Vec<Violation> = validator
        .iter_errors(instance)
        .map(|e| Violation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: describe(&e),
        })
        .collect();

    if violations.is_empty() {
        None
    } else {
        Some(ValidationViolations::new(violations))
    }
}

impl SchemaStore {
    /// Validate a document against the schema for `kind`.
    ///
    /// [`Document::Empty`] is validated as `null`, which every kind schema
    /// rejects with `None is not of type 'object'`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ValidationFailed`] with every violation if the
    /// document is invalid, or a store error if the schema is unavailable.
    pub fn validate_document(&self, kind: SchemaKind, document: &Document) -> Result<(), SchemaError> {
        let validator = self.build_validator(kind)?;
        match validate_value(&validator, &document.to_value()) {
            None => Ok(()),
            Some(violations) => {
                tracing::debug!(
                    kind = %kind,
                    count = violations.len(),
                    "document failed schema validation"
                );
                for v in violations.violations() {
                    tracing::trace!(
                        instance_path = %v.instance_path,
                        schema_path = %v.schema_path,
                        "{}",
                        v.message
                    );
                }
                Err(SchemaError::ValidationFailed { kind, violations })
            }
        }
    }

    /// Validate and return the canonical message, or `None` if valid.
    ///
    /// # Errors
    ///
    /// Returns a store error if the schema is unavailable.
    pub fn validation_message(
        &self,
        kind: SchemaKind,
        document: &Document,
    ) -> Result<Option<String>, SchemaError> {
        match self.validate_document(kind, document) {
            Ok(()) => Ok(None),
            Err(SchemaError::ValidationFailed { violations, .. }) => Ok(Some(violations.message())),
            Err(other) => Err(other),
        }
    }
}

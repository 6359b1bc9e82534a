//! # Violation Messages
//!
//! Renders validation errors in the conventional JSON Schema phrasing that
//! CI consumers pattern-match on, e.g.:
//!
//! ```text
//! 'type' is a required property
//! None is not of type 'object'
//! [] should be non-empty
//! '' is not a 'uri'
//! ```
//!
//! Instances are written as literals in that same convention: `None`,
//! `True`/`False`, single-quoted strings, `[a, b]` lists, and `{'k': v}`
//! mappings. Keywords without a conventional phrase fall back to the
//! underlying validator's own message.

use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::ValidationError;
use serde_json::Value;

/// Describe one validation error.
pub fn describe(error: &ValidationError<'_>) -> String {
    let instance: &Value = &error.instance;
    let inst = literal(instance);

    match &error.kind {
        ValidationErrorKind::Required { property } => {
            format!("{} is a required property", literal(property))
        }
        ValidationErrorKind::Type {
            kind: TypeKind::Single(expected),
        } => format!("{inst} is not of type {}", quote(&expected.to_string())),
        ValidationErrorKind::MinItems { limit } | ValidationErrorKind::MinLength { limit } => {
            if *limit == 1 {
                format!("{inst} should be non-empty")
            } else {
                format!("{inst} is too short")
            }
        }
        ValidationErrorKind::MaxItems { limit } | ValidationErrorKind::MaxLength { limit } => {
            if *limit == 0 {
                format!("{inst} is expected to be empty")
            } else {
                format!("{inst} is too long")
            }
        }
        ValidationErrorKind::Format { format } => format!("{inst} is not a {}", quote(format)),
        ValidationErrorKind::Enum { options } => {
            format!("{inst} is not one of {}", literal(options))
        }
        ValidationErrorKind::Constant { expected_value } => {
            format!("{} was expected", literal(expected_value))
        }
        ValidationErrorKind::Pattern { pattern } => {
            format!("{inst} does not match {}", quote(pattern))
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            additional_properties(unexpected)
        }
        ValidationErrorKind::UniqueItems => format!("{inst} has non-unique elements"),
        ValidationErrorKind::Minimum { limit } => {
            format!("{inst} is less than the minimum of {}", literal(limit))
        }
        ValidationErrorKind::Maximum { limit } => {
            format!("{inst} is greater than the maximum of {}", literal(limit))
        }
        _ => error.to_string(),
    }
}

/// Names are listed in document order.
fn additional_properties(unexpected: &[String]) -> String {
    let listed = unexpected.iter().map(|n| quote(n)).collect::<Vec<_>>().join(", ");
    let verb = if unexpected.len() == 1 { "was" } else { "were" };
    format!("Additional properties are not allowed ({listed} {verb} unexpected)")
}

/// Render a JSON value as a literal in the conventional message style.
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(literal).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), literal(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

/// Quote a string, preferring single quotes unless the text contains one
/// and no double quote.
pub fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

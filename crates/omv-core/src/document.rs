//! # Parsed Metadata Documents
//!
//! A `Document` is the in-memory form of a metadata file. Files with no
//! YAML content (empty, whitespace, comments only, or an explicit `null`)
//! load as [`Document::Empty`] rather than failing; the schema later
//! rejects them as "not an object".

use serde_json::Value;

/// In-memory representation of a metadata file's contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// The file contained no data.
    Empty,
    /// The parsed, JSON-compatible value tree.
    Data(Value),
}

impl Document {
    /// Wrap a parsed value, folding `null` into [`Document::Empty`].
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            other => Self::Data(other),
        }
    }

    /// Returns true if the document carries no data.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The value presented to schema validation. `Empty` validates as `null`.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Data(v) => v.clone(),
        }
    }

    /// Borrow the data, if any.
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Self::Empty => None,
            Self::Data(v) => Some(v),
        }
    }
}

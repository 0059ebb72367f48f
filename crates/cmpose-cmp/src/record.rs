//! Source records of a CMP document.
//!
//! Every top-level key of a CMP file is one record. Bone records hold a run of
//! hex byte pairs, metadata records hold short strings, and absent bones are
//! written either as JSON `null` or as the literal string `"null"`.

use serde_json::Value;

use crate::{Quaternion, Result};

/// Literal string some CMP writers use instead of JSON `null`.
pub const NULL_MARKER: &str = "null";

/// The value side of a CMP record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    /// Key not present in the document.
    Missing,
    /// JSON `null` or the literal `"null"` string.
    Null,
    /// A string value.
    ///
    /// Bone records hold space-separated hex byte pairs, metadata records hold
    /// plain text. The content is not validated until it is decoded.
    Text(String),
    /// Any other JSON type, identified by name.
    Other(&'static str),
}

impl RecordValue {
    /// Classify a JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => RecordValue::Null,
            Value::String(s) if s == NULL_MARKER => RecordValue::Null,
            Value::String(s) => RecordValue::Text(s.clone()),
            other => RecordValue::Other(json_kind(other)),
        }
    }

    /// Check if the value is absent or null.
    pub fn is_null_or_missing(&self) -> bool {
        matches!(self, RecordValue::Missing | RecordValue::Null)
    }

    /// Get the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A named entry of a CMP document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    name: String,
    value: RecordValue,
}

impl SourceRecord {
    /// Create a record from a name and value.
    pub fn new(name: impl Into<String>, value: RecordValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Create a record for a hex string value.
    pub fn hex(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, RecordValue::Text(value.into()))
    }

    /// Create a record for a key that is not in the document.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::new(name, RecordValue::Missing)
    }

    /// Get the record identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the record value.
    pub fn value(&self) -> &RecordValue {
        &self.value
    }

    /// Decode the value as a rotation quaternion.
    ///
    /// Returns `Ok(None)` for null or missing values.
    pub fn decode_rotation(&self) -> Result<Option<Quaternion>> {
        match &self.value {
            RecordValue::Missing | RecordValue::Null => Ok(None),
            RecordValue::Text(s) => Quaternion::decode_hex(s).map(Some),
            RecordValue::Other(kind) => Err(crate::Error::UnexpectedType(*kind)),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

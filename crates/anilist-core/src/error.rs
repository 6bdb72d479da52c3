//! Error types for descriptors and response mapping.

use serde_json::Value;

/// A JSON response that does not fit the expected Rust type.
///
/// Mapping errors mean the local descriptors and the live remote schema
/// disagree. They are never defaulted away.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// A non-nullable field was missing or null.
    #[error("missing required field `{field}` on `{type_name}`")]
    MissingField { type_name: String, field: String },

    /// A field was present but could not be coerced.
    #[error("invalid value for field `{field}` on `{type_name}`: expected {expected}, found {found}")]
    InvalidField {
        type_name: String,
        field: String,
        expected: String,
        found: String,
    },

    /// A value could not be coerced, before the owning field is known.
    #[error("expected {expected}, found {found}")]
    Unexpected { expected: String, found: String },

    /// Mapping code asked for a field its descriptor does not declare.
    #[error("`{type_name}` has no field named `{field}`")]
    UnknownField { type_name: String, field: String },
}

impl MappingError {
    /// Create a missing-field error.
    pub fn missing(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Create a coercion error for `value`.
    pub fn unexpected(expected: impl Into<String>, value: &Value) -> Self {
        Self::Unexpected {
            expected: expected.into(),
            found: describe(value),
        }
    }

    /// Create an unknown-field error.
    pub fn unknown_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Attach the owning type and field to a bare coercion error.
    ///
    /// Errors that already name a field are returned unchanged, so the
    /// innermost location wins.
    pub fn within(self, type_name: &str, field: &str) -> Self {
        match self {
            Self::Unexpected { expected, found } => Self::InvalidField {
                type_name: type_name.to_owned(),
                field: field.to_owned(),
                expected,
                found,
            },
            other => other,
        }
    }
}

/// A hand-built descriptor that breaks a descriptor invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("`{type_name}` declares remote field `{remote_name}` more than once")]
    DuplicateRemoteName {
        type_name: &'static str,
        remote_name: &'static str,
    },

    #[error("`{type_name}` declares local field `{local_name}` more than once")]
    DuplicateLocalName {
        type_name: &'static str,
        local_name: &'static str,
    },
}

/// Short description of a JSON value for error messages.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) if s.chars().count() > 32 => {
            let head: String = s.chars().take(32).collect();
            format!("string {head:?}...")
        }
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Object(_) => "object".into(),
    }
}

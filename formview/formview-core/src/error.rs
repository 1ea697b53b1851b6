//! Error types for the schema, validation and renderer layers.

use std::fmt;

/// Structural problems with a schema definition.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Schema JSON could not be parsed.
    #[error("failed to parse schema: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// A field at `index` has an empty name.
    #[error("field at index {index} has an empty name")]
    EmptyFieldName { index: usize },

    /// Two fields share the same name.
    #[error("duplicate field name '{field}'")]
    DuplicateField { field: String },

    /// A layout container lists a field that the schema does not define.
    #[error("{container} '{id}' references unknown field '{field}'")]
    UnknownLayoutField {
        container: &'static str,
        id: String,
        field: String,
    },
}

/// Machine-readable reason for a [`FieldValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCode {
    Required,
    InvalidType,
    MinLength,
    MaxLength,
    Pattern,
    InvalidPattern,
    Format,
    MinValue,
    MaxValue,
    NotInteger,
    NotPositive,
    NotNegative,
    MultipleOf,
    MinItems,
    MaxItems,
    UniqueItems,
    Cancelled,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidType => "invalid_type",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Pattern => "pattern",
            Self::InvalidPattern => "invalid_pattern",
            Self::Format => "format",
            Self::MinValue => "min_value",
            Self::MaxValue => "max_value",
            Self::NotInteger => "not_integer",
            Self::NotPositive => "not_positive",
            Self::NotNegative => "not_negative",
            Self::MultipleOf => "multiple_of",
            Self::MinItems => "min_items",
            Self::MaxItems => "max_items",
            Self::UniqueItems => "unique_items",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed check produced by [`Field::validate_value`](crate::Field::validate_value).
///
/// Displays as the user-facing message only; `field` and `code` are kept for
/// programmatic inspection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldValidationError {
    pub field: String,
    pub code: ValidationCode,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

/// Error returned by [`FieldRenderer`](crate::FieldRenderer) implementations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing markup into the output buffer failed.
    #[error(transparent)]
    Write(#[from] fmt::Error),

    /// The renderer cannot produce markup for the given presentation record.
    #[error("cannot render field '{field}': {detail}")]
    Unsupported { field: String, detail: String },

    /// Any other renderer-specific failure.
    #[error("renderer failed for field '{field}': {source}")]
    Other {
        field: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Error returned by typed [`Value`](crate::Value) accessors on a variant mismatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value type mismatch: expected {expected}, got {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: &'static str,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: &'static str) -> Self {
        Self {
            expected: expected.into(),
            actual,
        }
    }
}

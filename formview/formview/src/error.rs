//! Error types for the registry, mapper, state manager and template renderer.

use std::fmt;

use formview_core::{FieldType, FieldValidationError, RenderError};

/// Errors produced by [`ComponentRegistry`](crate::ComponentRegistry).
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A binding with equal or higher priority already exists for the type.
    #[error(
        "renderer for type '{field_type}' already registered with priority {existing} (attempted {attempted})"
    )]
    LowerPriority {
        field_type: FieldType,
        existing: i32,
        attempted: i32,
    },

    /// Neither a direct binding nor a fallback accepts the type.
    #[error("no renderer found for field type '{field_type}'")]
    NoRenderer { field_type: FieldType },
}

/// Errors produced by [`FieldMapper`](crate::FieldMapper).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapperError {
    #[error("field cannot be nil")]
    NilField,

    #[error("action cannot be nil")]
    NilAction,
}

/// Errors produced by [`StateManager`](crate::StateManager).
///
/// Validation failures of well-formed input are recorded in the error map,
/// not returned from mutations. [`StateError::Validation`] is only returned
/// by the explicit `validate_*` calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("field '{field}' not found in schema")]
    UnknownField { field: String },

    #[error(transparent)]
    Validation(#[from] FieldValidationError),
}

/// Errors produced by [`TemplateRenderer`](crate::TemplateRenderer).
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A required argument was not supplied.
    #[error("{what} cannot be nil")]
    Nil { what: &'static str },

    #[error("failed to convert field '{field}': {source}")]
    Convert {
        field: String,
        #[source]
        source: MapperError,
    },

    #[error("failed to resolve renderer for field '{field}' (type {field_type}): {source}")]
    Resolve {
        field: String,
        field_type: FieldType,
        #[source]
        source: RegistryError,
    },

    #[error("failed to render field '{field}': {source}")]
    Render {
        field: String,
        #[source]
        source: RenderError,
    },

    /// A layout container lists a field the schema does not define.
    #[error("{container} '{id}' references unknown field '{field}'")]
    UnknownLayoutField {
        container: &'static str,
        id: String,
        field: String,
    },

    #[error(transparent)]
    Write(#[from] fmt::Error),
}

impl TemplateError {
    /// Name of the field whose pipeline failed, if the error is field-scoped.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Convert { field, .. }
            | Self::Resolve { field, .. }
            | Self::Render { field, .. }
            | Self::UnknownLayoutField { field, .. } => Some(field),
            Self::Nil { .. } | Self::Write(_) => None,
        }
    }
}

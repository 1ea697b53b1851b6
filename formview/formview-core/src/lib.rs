//! Markup-agnostic core types and renderer contracts for `formview`.
//!
//! This crate provides the read-only form schema model ([`Schema`] /
//! [`Field`]), the [`Value`] representation of field values, the
//! renderer-agnostic presentation record ([`FieldProps`]) and the
//! [`FieldRenderer`] trait implemented by markup plugins.

mod context;
mod error;
mod field_kind;
mod field_type;
mod markup;
mod props;
mod renderer;
mod schema;
mod tokens;
mod validation;
mod value;

pub use context::{CancellationFlag, FormContext};
pub use error::{FieldValidationError, RenderError, SchemaError, ValidationCode, ValueTypeError};
pub use field_kind::FieldKind;
pub use field_type::FieldType;
pub use markup::{escape_attr, escape_text};
pub use props::{
    ButtonProps, ButtonType, ClientRuleKind, ClientValidationRule, ClientValidationRules,
    FieldProps, SelectOption, ValidationRule,
};
pub use renderer::FieldRenderer;
pub use schema::{
    Action, ActionType, AutocompleteOptions, DateTimeOptions, Field, FieldBuilder, FieldConfig,
    FieldI18n, FieldOption, FieldStyle, FieldValidation, FileOptions, FileValidation, FormConfig,
    GroupOptions, Group, Layout, LayoutType, LocalizedText, Schema, Section, SelectOptions,
    SliderOptions, Step, Tab, TagsOptions, TextareaOptions, ValidationMessages, ValueFormat,
};
pub use tokens::{TokenKey, TokenTable};
pub use validation::{ValidationOrchestrator, ValidationState};
pub use value::Value;

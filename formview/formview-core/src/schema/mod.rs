//! Read-only form schema model.
//!
//! A [`Schema`] is loaded once per form definition and shared by every
//! request that renders it; nothing in this crate mutates it after load.

mod field;
mod layout;
mod options;
mod rules;
mod validate;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use field::{Field, FieldBuilder, FieldI18n, FieldOption, FieldStyle, LocalizedText};
pub use layout::{Group, Layout, LayoutType, Section, Step, Tab};
pub use options::{
    AutocompleteOptions, DateTimeOptions, FieldConfig, FileOptions, GroupOptions, SelectOptions,
    SliderOptions, TagsOptions, TextareaOptions,
};
pub use rules::{FieldValidation, FileValidation, ValidationMessages, ValueFormat};

use crate::error::SchemaError;

/// Complete form definition: fields in declaration order, optional layout
/// and trailing actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub id: String,
    #[serde(rename = "type")]
    pub schema_type: String,
    pub title: String,
    pub fields: Vec<Field>,
    pub layout: Option<Layout>,
    pub actions: Vec<Action>,
    pub config: Option<FormConfig>,
}

impl Schema {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            schema_type: "form".to_string(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Parse a schema from JSON and check it with [`Schema::validate`].
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: Schema =
            serde_json::from_str(json).map_err(|source| SchemaError::Parse { source })?;
        schema.validate()?;
        Ok(schema)
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Check structural invariants: non-empty unique field names and layout
    /// containers that only reference declared fields.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName { index });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    field: field.name.clone(),
                });
            }
        }

        if let Some(layout) = &self.layout {
            for (container, id, field) in layout.member_references() {
                if !seen.contains(field) {
                    return Err(SchemaError::UnknownLayoutField {
                        container,
                        id: id.to_string(),
                        field: field.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Form submission settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub method: String,
    pub action: String,
    /// HTMX swap target for the form response.
    pub target: String,
}

/// Kind of button an [`Action`] renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[default]
    Submit,
    Reset,
    Button,
    Link,
}

/// Button rendered after the form fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    pub id: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub text: String,
    pub variant: String,
    /// `sm`, `md`, `lg` or `xl`; anything else renders as `md`.
    pub size: String,
    pub disabled: bool,
    pub loading: bool,
}

impl Action {
    pub fn new(id: impl Into<String>, action_type: ActionType, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action_type,
            text: text.into(),
            ..Default::default()
        }
    }
}

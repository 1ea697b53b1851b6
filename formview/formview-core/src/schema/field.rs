use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{options::FieldConfig, rules::FieldValidation};
use crate::{field_type::FieldType, value::Value};

/// Immutable description of one form field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: String,
    pub help: String,
    pub description: String,
    pub tooltip: String,
    pub icon: String,
    pub required: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub hidden: bool,
    /// Explicit default; falls back to a type-appropriate empty value.
    pub default: Option<Value>,
    pub options: Vec<FieldOption>,
    pub validation: Option<FieldValidation>,
    pub i18n: Option<FieldI18n>,
    pub config: Option<FieldConfig>,
    pub style: Option<FieldStyle>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            ..Default::default()
        }
    }

    /// Start a fluent builder for a field.
    pub fn builder(name: impl Into<String>, field_type: FieldType) -> FieldBuilder {
        FieldBuilder {
            field: Self::new(name, field_type),
        }
    }

    /// Label used in messages; the field name when no label is set.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Value a fresh form starts with: the explicit default if any, else a
    /// type-appropriate empty value.
    pub fn default_value(&self) -> Value {
        match &self.default {
            Some(value) if !value.is_null() => value.clone(),
            _ => self.type_default_value(),
        }
    }

    fn type_default_value(&self) -> Value {
        match self.field_type {
            FieldType::Checkbox | FieldType::Switch => Value::Bool(false),
            FieldType::MultiSelect | FieldType::Checkboxes | FieldType::Tags => {
                Value::List(Vec::new())
            }
            FieldType::Number | FieldType::Currency | FieldType::Slider | FieldType::Rating => {
                Value::Int(0)
            }
            _ => Value::String(String::new()),
        }
    }

    /// Label of the option whose value is `value`, if any.
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

/// Fluent construction of a [`Field`].
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.field.label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.field.placeholder = placeholder.into();
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.field.help = help.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.field.description = description.into();
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.field.tooltip = tooltip.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.field.icon = icon.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.field.required = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.field.disabled = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.field.readonly = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.field.hidden = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.field.default = Some(value.into());
        self
    }

    pub fn option(mut self, option: FieldOption) -> Self {
        self.field.options.push(option);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = FieldOption>) -> Self {
        self.field.options.extend(options);
        self
    }

    pub fn validation(mut self, validation: FieldValidation) -> Self {
        self.field.validation = Some(validation);
        self
    }

    pub fn i18n(mut self, i18n: FieldI18n) -> Self {
        self.field.i18n = Some(i18n);
        self
    }

    pub fn config(mut self, config: FieldConfig) -> Self {
        self.field.config = Some(config);
        self
    }

    pub fn style(mut self, style: FieldStyle) -> Self {
        self.field.style = Some(style);
        self
    }

    pub fn build(self) -> Field {
        self.field
    }
}

/// One selectable choice of a selection field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
    pub description: String,
    pub disabled: bool,
    pub selected: bool,
    pub icon: String,
    pub group: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// Which localizable string of a field to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalizedText {
    Label,
    Placeholder,
    Help,
    Description,
    Tooltip,
}

/// Per-locale overrides of a field's display strings, keyed by locale code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldI18n {
    pub label: HashMap<String, String>,
    pub placeholder: HashMap<String, String>,
    pub help: HashMap<String, String>,
    pub description: HashMap<String, String>,
    pub tooltip: HashMap<String, String>,
}

impl FieldI18n {
    pub fn with_label(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.label.insert(locale.into(), text.into());
        self
    }

    pub fn with_placeholder(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.placeholder.insert(locale.into(), text.into());
        self
    }

    pub fn with_help(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.help.insert(locale.into(), text.into());
        self
    }

    /// Non-empty translation of `text` for `locale`.
    pub fn get(&self, text: LocalizedText, locale: &str) -> Option<&str> {
        let table = match text {
            LocalizedText::Label => &self.label,
            LocalizedText::Placeholder => &self.placeholder,
            LocalizedText::Help => &self.help,
            LocalizedText::Description => &self.description,
            LocalizedText::Tooltip => &self.tooltip,
        };
        table
            .get(locale)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// CSS class hooks for the field wrapper and its parts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldStyle {
    pub classes: String,
    pub label_class: String,
    pub input_class: String,
    pub error_class: String,
}

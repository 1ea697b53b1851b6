//! Renderer-agnostic presentation records.
//!
//! A [`FieldProps`] is built fresh for every render of a field and handed to
//! a [`FieldRenderer`](crate::FieldRenderer) by reference. It holds plain
//! values only and never points back into form state.

use std::fmt;

use serde::Serialize;

use crate::{
    field_kind::FieldKind, field_type::FieldType, schema::FieldConfig, tokens::TokenTable,
    validation::ValidationState,
};

/// Everything a renderer needs to draw one field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldProps {
    pub kind: FieldKind,
    /// Schema type tag the kind was derived from.
    pub field_type: FieldType,

    pub id: String,
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub help_text: String,
    pub description: String,
    pub tooltip: String,
    pub icon: String,

    /// Scalar text form of the current value.
    pub value: String,
    /// Selected items of multi-value fields.
    pub values: Vec<String>,

    pub errors: Vec<String>,
    /// `errors` joined with `"; "`.
    pub error_text: String,

    pub required: bool,
    pub disabled: bool,
    pub readonly: bool,
    /// Rendered as a hidden input with no visible chrome.
    pub hidden: bool,
    pub touched: bool,
    pub dirty: bool,

    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    /// Numeric bounds, pre-formatted with two decimals.
    pub min: Option<String>,
    pub max: Option<String>,
    pub step: Option<String>,

    pub accept: Option<String>,
    pub max_file_size: Option<u64>,
    pub max_files: Option<usize>,
    pub multiple: bool,

    pub options: Vec<SelectOption>,
    /// Typed per-kind options copied from the field.
    pub config: Option<FieldConfig>,

    pub validation_rules: Vec<ValidationRule>,
    pub client_rules: Option<ClientValidationRules>,
    pub validation_state: ValidationState,
    pub validation_loading: bool,
    pub validate_on_blur: bool,
    pub validate_on_input: bool,
    /// Endpoint for server-side validation of this field.
    pub on_validate: Option<String>,
    pub validation_debounce_ms: Option<u64>,

    pub class: String,
    pub label_class: String,
    pub input_class: String,
    pub error_class: String,

    pub locale: String,
    pub theme_id: String,
    pub dark_mode: bool,
    #[serde(skip)]
    pub tokens: TokenTable,
}

impl FieldProps {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether `value` is the current value or one of the selected values.
    pub fn is_selected(&self, value: &str) -> bool {
        self.value == value || self.values.iter().any(|v| v == value)
    }

    /// Append a class to the wrapper class list.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() {
            return;
        }
        if !self.class.is_empty() {
            self.class.push(' ');
        }
        self.class.push_str(class);
    }
}

/// One choice of a selection field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub description: String,
    pub disabled: bool,
    pub selected: bool,
    pub icon: String,
    pub group: String,
}

/// Extra rule carried on the props for renderers that emit their own checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRule {
    pub rule_type: String,
    pub value: String,
    pub message: String,
}

/// Rules a browser can enforce, plus server-side rules flagged async.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientValidationRules {
    pub field_name: String,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub pattern: Option<String>,
    pub format: Option<String>,
    pub custom_rules: Vec<ClientValidationRule>,
}

impl ClientValidationRules {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..Default::default()
        }
    }

    /// Whether any rule needs a server round-trip.
    pub fn has_async(&self) -> bool {
        self.custom_rules.iter().any(|r| r.is_async)
    }

    /// No rule at all, not even `required`.
    pub fn is_empty(&self) -> bool {
        !self.required
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.pattern.is_none()
            && self.format.is_none()
            && self.custom_rules.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientRuleKind {
    EmailFormat,
    UrlFormat,
    PhoneFormat,
    Uniqueness,
    AsyncCustom,
}

impl ClientRuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailFormat => "email_format",
            Self::UrlFormat => "url_format",
            Self::PhoneFormat => "phone_format",
            Self::Uniqueness => "uniqueness",
            Self::AsyncCustom => "async_custom",
        }
    }
}

impl fmt::Display for ClientRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientValidationRule {
    pub kind: ClientRuleKind,
    /// Rule argument, e.g. the custom expression.
    pub value: Option<String>,
    pub message: String,
    /// Must be checked by the validation endpoint rather than in the browser.
    #[serde(rename = "async")]
    pub is_async: bool,
}

/// HTML button type of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    #[default]
    Submit,
    Reset,
    Button,
}

impl ButtonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Reset => "reset",
            Self::Button => "button",
        }
    }
}

impl fmt::Display for ButtonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation record for a form action button.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ButtonProps {
    pub button_type: ButtonType,
    pub text: String,
    pub variant: String,
    pub enabled: bool,
    pub id: String,
    pub class: String,
}

//! Schema field to presentation record translation.

use formview_core::{
    Action, ActionType, ButtonProps, ButtonType, ClientRuleKind, ClientValidationRule,
    ClientValidationRules, Field, FieldKind, FieldProps, FieldType, FieldValidation, FormContext,
    LocalizedText, SelectOption, ValidationMessages, ValidationRule, Value,
};
use serde_json::json;

use crate::{config::RenderConfig, error::MapperError};

/// How a schema field type maps onto a renderer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindMapping {
    /// The type has its own entry in the mapping table.
    Direct(FieldKind),
    /// The type is not in the table and degrades to [`FieldKind::Text`].
    Fallback,
}

impl KindMapping {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Direct(kind) => *kind,
            Self::Fallback => FieldKind::Text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

/// Look up the renderer kind for a schema field type.
pub fn map_field_type(field_type: &FieldType) -> KindMapping {
    let kind = match field_type {
        FieldType::Text => FieldKind::Text,
        FieldType::Email => FieldKind::Email,
        FieldType::Password => FieldKind::Password,
        FieldType::Number => FieldKind::Number,
        FieldType::Phone => FieldKind::Tel,
        FieldType::Url => FieldKind::Url,
        FieldType::Hidden => FieldKind::Text,
        FieldType::Date => FieldKind::Date,
        FieldType::Time => FieldKind::Time,
        FieldType::DateTime => FieldKind::DateTime,
        FieldType::DateRange => FieldKind::DateRange,
        FieldType::Textarea => FieldKind::Textarea,
        FieldType::Select => FieldKind::Select,
        FieldType::MultiSelect => FieldKind::MultiSelect,
        FieldType::Radio => FieldKind::Radio,
        FieldType::Checkbox => FieldKind::Checkbox,
        FieldType::Checkboxes => FieldKind::CheckboxGroup,
        FieldType::AutoComplete => FieldKind::AutoComplete,
        FieldType::Color => FieldKind::Color,
        FieldType::File => FieldKind::File,
        FieldType::Slider => FieldKind::Range,
        FieldType::Tags => FieldKind::Tags,
        _ => return KindMapping::Fallback,
    };
    KindMapping::Direct(kind)
}

/// Pure translator from schema fields to [`FieldProps`].
///
/// Reads only its arguments and its own configuration; it never touches form
/// state.
#[derive(Debug, Clone, Default)]
pub struct FieldMapper {
    config: RenderConfig,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.config.locale = locale.into();
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build the presentation record for `field`.
    ///
    /// A locale carried by `ctx` takes precedence over the configured one.
    pub fn convert(
        &self,
        ctx: &FormContext,
        field: Option<&Field>,
        value: Option<&Value>,
        errors: &[String],
        touched: bool,
        dirty: bool,
    ) -> Result<FieldProps, MapperError> {
        let field = field.ok_or(MapperError::NilField)?;
        let locale = ctx.locale().unwrap_or(self.config.locale.as_str());
        let localize = |default: &str, text: LocalizedText| {
            self.localize_for(locale, field, default, text)
        };

        let mapping = map_field_type(&field.field_type);
        let mut props = FieldProps {
            kind: mapping.kind(),
            field_type: field.field_type.clone(),
            id: field_id(&field.name),
            name: field.name.clone(),
            label: localize(&field.label, LocalizedText::Label),
            placeholder: localize(&field.placeholder, LocalizedText::Placeholder),
            help_text: localize(&field.help, LocalizedText::Help),
            description: localize(&field.description, LocalizedText::Description),
            tooltip: localize(&field.tooltip, LocalizedText::Tooltip),
            icon: field.icon.clone(),
            value: value.map(Value::to_string).unwrap_or_default(),
            errors: errors.to_vec(),
            error_text: errors.join("; "),
            required: field.required,
            disabled: field.disabled,
            readonly: field.readonly,
            hidden: field.hidden || field.field_type == FieldType::Hidden,
            touched,
            dirty,
            validate_on_blur: self.config.validate_on_blur,
            validate_on_input: self.config.validate_on_input,
            locale: locale.to_string(),
            theme_id: self.config.theme.clone(),
            dark_mode: self.config.dark_mode,
            ..Default::default()
        };

        if let Some(rules) = &field.validation {
            map_validation_rules(field, rules, &mut props);
        }
        props.multiple = field.field_type == FieldType::MultiSelect;
        props.config = field
            .config
            .as_ref()
            .filter(|c| c.applies_to(&field.field_type))
            .cloned();
        map_options(field, value, &mut props);

        if let Some(style) = &field.style {
            props.class = style.classes.clone();
            props.label_class = style.label_class.clone();
            props.input_class = style.input_class.clone();
            props.error_class = style.error_class.clone();
        }

        if mapping.is_fallback() {
            tracing::debug!(
                field = %field.name,
                field_type = %field.field_type,
                "field type has no kind mapping, using text"
            );
        }
        Ok(props)
    }

    /// Presentation record for a form action button.
    pub fn convert_action(
        &self,
        action: Option<&Action>,
        enabled: bool,
    ) -> Result<ButtonProps, MapperError> {
        let action = action.ok_or(MapperError::NilAction)?;
        let button_type = match action.action_type {
            ActionType::Submit => ButtonType::Submit,
            ActionType::Reset => ButtonType::Reset,
            ActionType::Button | ActionType::Link => ButtonType::Button,
        };
        let variant = if action.variant.is_empty() {
            "default".to_string()
        } else {
            action.variant.clone()
        };

        let mut class = match action.size.as_str() {
            "sm" => "btn-sm",
            "lg" => "btn-lg",
            "xl" => "btn-xl",
            _ => "btn-md",
        }
        .to_string();
        if action.loading {
            class.push_str(" btn-loading");
        }

        Ok(ButtonProps {
            button_type,
            text: action.text.clone(),
            variant,
            enabled: enabled && !action.disabled,
            id: action.id.clone(),
            class,
        })
    }

    /// Client-facing rule set for `field`.
    ///
    /// Uniqueness and custom expressions cannot be checked in the browser and
    /// come back flagged async.
    pub fn extract_client_validation_rules(&self, field: &Field) -> ClientValidationRules {
        let mut rules = ClientValidationRules::new(field.name.clone());
        rules.required = field.required;

        if let Some(v) = &field.validation {
            rules.min_length = v.min_length;
            rules.max_length = v.max_length;
            rules.min = v.min;
            rules.max = v.max;
            rules.step = v.step;
            rules.pattern = v.pattern.clone().filter(|p| !p.is_empty());
            rules.format = v
                .format
                .as_ref()
                .filter(|f| f.is_client_checkable())
                .map(ToString::to_string);

            if let Some(expr) = v.custom.as_deref().filter(|e| !e.is_empty()) {
                let message = if v.messages.is_some() {
                    message_override(v, |m| &m.custom)
                        .unwrap_or_else(|| "Please enter a valid value".to_string())
                } else {
                    "Validation failed".to_string()
                };
                rules.custom_rules.push(ClientValidationRule {
                    kind: ClientRuleKind::AsyncCustom,
                    value: Some(expr.to_string()),
                    message,
                    is_async: true,
                });
            }
        }

        let type_rule = match field.field_type {
            FieldType::Email => Some((
                ClientRuleKind::EmailFormat,
                "Please enter a valid email address",
            )),
            FieldType::Url => Some((ClientRuleKind::UrlFormat, "Please enter a valid URL")),
            FieldType::Phone => Some((
                ClientRuleKind::PhoneFormat,
                "Please enter a valid phone number",
            )),
            _ => None,
        };
        if let Some((kind, message)) = type_rule {
            rules.custom_rules.push(ClientValidationRule {
                kind,
                value: None,
                message: message.to_string(),
                is_async: false,
            });
        }

        if field.validation.as_ref().is_some_and(|v| v.unique) {
            rules.custom_rules.push(ClientValidationRule {
                kind: ClientRuleKind::Uniqueness,
                value: None,
                message: "This value must be unique".to_string(),
                is_async: true,
            });
        }
        rules
    }

    pub fn has_client_validation_rules(&self, field: &Field) -> bool {
        !self.extract_client_validation_rules(field).is_empty()
    }

    /// JSON document handed to client-side validation scripts.
    pub fn client_validation_config(&self, field: &Field) -> serde_json::Value {
        let rules = self.extract_client_validation_rules(field);
        json!({
            "fieldName": field.name,
            "required": field.required,
            "rules": rules,
            "realTime": true,
            "debounceMs": self.config.debounce_ms,
        })
    }

    /// Display string for `text` in the configured locale.
    pub fn localize(&self, field: &Field, default: &str, text: LocalizedText) -> String {
        self.localize_for(&self.config.locale, field, default, text)
    }

    fn localize_for(
        &self,
        locale: &str,
        field: &Field,
        default: &str,
        text: LocalizedText,
    ) -> String {
        if locale.is_empty() || locale == self.config.default_locale {
            return default.to_string();
        }
        field
            .i18n
            .as_ref()
            .and_then(|i18n| i18n.get(text, locale))
            .unwrap_or(default)
            .to_string()
    }
}

/// Stable DOM id derived from a field name.
pub fn field_id(name: &str) -> String {
    name.to_lowercase().replace([' ', '_'], "-")
}

fn map_validation_rules(field: &Field, v: &FieldValidation, props: &mut FieldProps) {
    props.min_length = v.min_length;
    props.max_length = v.max_length;
    props.pattern = v.pattern.clone().filter(|p| !p.is_empty());
    props.min = v.min.map(|n| format!("{n:.2}"));
    props.max = v.max.map(|n| format!("{n:.2}"));
    props.step = v.step.map(|n| format!("{n:.2}"));

    if let Some(min_items) = v.min_items
        && field.field_type == FieldType::MultiSelect
    {
        props.validation_rules.push(ValidationRule {
            rule_type: "minItems".to_string(),
            value: min_items.to_string(),
            message: message_override(v, |m| &m.required)
                .unwrap_or_else(|| format!("Select at least {min_items} items")),
        });
    }

    if let Some(file) = &v.file {
        props.max_file_size = file.max_size;
        if !file.accept.is_empty() {
            props.accept = Some(file.accept.join(","));
        }
        props.max_files = file.max_files;
    }

    if let Some(expr) = v.custom.as_deref().filter(|e| !e.is_empty()) {
        props.validation_rules.push(ValidationRule {
            rule_type: "custom".to_string(),
            value: expr.to_string(),
            message: "Custom validation failed".to_string(),
        });
    }
}

fn map_options(field: &Field, value: Option<&Value>, props: &mut FieldProps) {
    props.options = field
        .options
        .iter()
        .map(|o| SelectOption {
            value: o.value.clone(),
            label: o.label.clone(),
            description: o.description.clone(),
            disabled: o.disabled,
            selected: o.selected,
            icon: o.icon.clone(),
            group: o.group.clone(),
        })
        .collect();

    if !field.field_type.has_list_value() {
        return;
    }
    props.values = match value {
        Some(Value::List(items)) => items.iter().map(ToString::to_string).collect(),
        _ => props
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.clone())
            .collect(),
    };
}

fn message_override(
    v: &FieldValidation,
    pick: impl FnOnce(&ValidationMessages) -> &Option<String>,
) -> Option<String> {
    v.messages
        .as_ref()
        .and_then(|m| pick(m).clone())
        .filter(|s| !s.is_empty())
}

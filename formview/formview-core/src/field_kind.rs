use std::fmt;

use serde::Serialize;

/// Presentation kind a renderer draws for a field.
///
/// Several schema [`FieldType`](crate::FieldType)s collapse onto the same kind
/// (e.g. `hidden` draws as [`FieldKind::Text`] with the hidden flag set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Tel,
    Url,
    Date,
    Time,
    DateTime,
    DateRange,
    Textarea,
    Select,
    MultiSelect,
    Radio,
    Checkbox,
    CheckboxGroup,
    AutoComplete,
    Color,
    File,
    Range,
    Tags,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime-local",
            Self::DateRange => "daterange",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::MultiSelect => "multiselect",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::CheckboxGroup => "checkbox-group",
            Self::AutoComplete => "autocomplete",
            Self::Color => "color",
            Self::File => "file",
            Self::Range => "range",
            Self::Tags => "tags",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

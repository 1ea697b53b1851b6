//! Typed per-kind field options.

use serde::{Deserialize, Serialize};

use crate::field_type::FieldType;

/// Options specific to one family of field types.
///
/// In JSON this is externally tagged, e.g. `{"textarea": {"rows": 6}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldConfig {
    Textarea(TextareaOptions),
    Select(SelectOptions),
    Group(GroupOptions),
    Autocomplete(AutocompleteOptions),
    File(FileOptions),
    DateTime(DateTimeOptions),
    Slider(SliderOptions),
    Tags(TagsOptions),
}

impl FieldConfig {
    /// Whether these options are meaningful for `field_type`.
    pub fn applies_to(&self, field_type: &FieldType) -> bool {
        match self {
            Self::Textarea(_) => matches!(field_type, FieldType::Textarea),
            Self::Select(_) => matches!(field_type, FieldType::Select | FieldType::MultiSelect),
            Self::Group(_) => matches!(field_type, FieldType::Radio | FieldType::Checkboxes),
            Self::Autocomplete(_) => matches!(field_type, FieldType::AutoComplete),
            Self::File(_) => matches!(field_type, FieldType::File | FieldType::Image),
            Self::DateTime(_) => matches!(
                field_type,
                FieldType::Date | FieldType::Time | FieldType::DateTime
            ),
            Self::Slider(_) => matches!(field_type, FieldType::Slider),
            Self::Tags(_) => matches!(field_type, FieldType::Tags),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Textarea(_) => "textarea",
            Self::Select(_) => "select",
            Self::Group(_) => "group",
            Self::Autocomplete(_) => "autocomplete",
            Self::File(_) => "file",
            Self::DateTime(_) => "date_time",
            Self::Slider(_) => "slider",
            Self::Tags(_) => "tags",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextareaOptions {
    pub rows: Option<u32>,
    pub auto_resize: bool,
    pub resizable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOptions {
    pub searchable: bool,
    pub clearable: bool,
    pub creatable: bool,
}

/// Radio and checkbox group arrangement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupOptions {
    pub inline: bool,
    pub columns: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteOptions {
    pub search_url: String,
    pub min_chars: Option<u32>,
    pub max_results: Option<u32>,
    /// Debounce before querying `search_url`, in milliseconds.
    pub debounce: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOptions {
    pub multiple: bool,
    pub show_preview: bool,
    pub drop_zone: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTimeOptions {
    pub format24: bool,
    pub show_calendar: bool,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderOptions {
    pub show_value: bool,
    pub show_min_max: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsOptions {
    pub max_tags: Option<u32>,
    pub editable: bool,
}

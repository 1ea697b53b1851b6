use std::fmt;

use serde::{Deserialize, Serialize};

/// Field type tags understood by the schema model.
///
/// Unrecognised tags are kept verbatim in [`FieldType::Unknown`] so that
/// schemas written for newer producers still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Hidden,
    Phone,
    Url,
    Date,
    Time,
    DateTime,
    DateRange,
    Month,
    Year,
    Quarter,
    Textarea,
    RichText,
    Code,
    Json,
    Select,
    MultiSelect,
    Radio,
    Checkbox,
    Checkboxes,
    TreeSelect,
    Cascader,
    Transfer,
    Switch,
    Slider,
    Rating,
    Color,
    File,
    Image,
    Video,
    Audio,
    Signature,
    Currency,
    Tags,
    Location,
    Relation,
    AutoComplete,
    IconPicker,
    Formula,
    Display,
    Divider,
    Html,
    Static,
    Group,
    Fieldset,
    Tabs,
    Panel,
    Collapse,
    Repeatable,
    TableRepeater,
    /// Unknown/custom tag
    Unknown(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Hidden => "hidden",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::DateRange => "daterange",
            Self::Month => "month",
            Self::Year => "year",
            Self::Quarter => "quarter",
            Self::Textarea => "textarea",
            Self::RichText => "richtext",
            Self::Code => "code",
            Self::Json => "json",
            Self::Select => "select",
            Self::MultiSelect => "multiselect",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Checkboxes => "checkboxes",
            Self::TreeSelect => "treeselect",
            Self::Cascader => "cascader",
            Self::Transfer => "transfer",
            Self::Switch => "switch",
            Self::Slider => "slider",
            Self::Rating => "rating",
            Self::Color => "color",
            Self::File => "file",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Signature => "signature",
            Self::Currency => "currency",
            Self::Tags => "tags",
            Self::Location => "location",
            Self::Relation => "relation",
            Self::AutoComplete => "autocomplete",
            Self::IconPicker => "icon-picker",
            Self::Formula => "formula",
            Self::Display => "display",
            Self::Divider => "divider",
            Self::Html => "html",
            Self::Static => "static",
            Self::Group => "group",
            Self::Fieldset => "fieldset",
            Self::Tabs => "tabs",
            Self::Panel => "panel",
            Self::Collapse => "collapse",
            Self::Repeatable => "repeatable",
            Self::TableRepeater => "table_repeater",
            Self::Unknown(s) => s,
        }
    }

    /// Fields whose value is a collection of option values.
    pub fn is_multi_value(&self) -> bool {
        matches!(self, Self::MultiSelect | Self::Checkboxes | Self::Tags)
    }

    /// Value arrives as a list: multi-value fields and date ranges.
    pub fn has_list_value(&self) -> bool {
        self.is_multi_value() || matches!(self, Self::DateRange)
    }

    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            Self::Select | Self::MultiSelect | Self::Radio | Self::Checkboxes
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Number | Self::Currency | Self::Slider | Self::Rating
        )
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File | Self::Image | Self::Signature)
    }

    pub fn is_date_time(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::Time | Self::DateTime | Self::DateRange
        )
    }

    /// Structural tags that group other fields instead of holding a value.
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            Self::Group | Self::Fieldset | Self::Tabs | Self::Panel | Self::Collapse
        )
    }
}

impl From<&str> for FieldType {
    fn from(s: &str) -> Self {
        match s {
            "text" => Self::Text,
            "email" => Self::Email,
            "password" => Self::Password,
            "number" => Self::Number,
            "hidden" => Self::Hidden,
            "phone" => Self::Phone,
            "url" => Self::Url,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime" => Self::DateTime,
            "daterange" => Self::DateRange,
            "month" => Self::Month,
            "year" => Self::Year,
            "quarter" => Self::Quarter,
            "textarea" => Self::Textarea,
            "richtext" => Self::RichText,
            "code" => Self::Code,
            "json" => Self::Json,
            "select" => Self::Select,
            "multiselect" => Self::MultiSelect,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "checkboxes" => Self::Checkboxes,
            "treeselect" => Self::TreeSelect,
            "cascader" => Self::Cascader,
            "transfer" => Self::Transfer,
            "switch" => Self::Switch,
            "slider" => Self::Slider,
            "rating" => Self::Rating,
            "color" => Self::Color,
            "file" => Self::File,
            "image" => Self::Image,
            "video" => Self::Video,
            "audio" => Self::Audio,
            "signature" => Self::Signature,
            "currency" => Self::Currency,
            "tags" => Self::Tags,
            "location" => Self::Location,
            "relation" => Self::Relation,
            "autocomplete" => Self::AutoComplete,
            "icon-picker" => Self::IconPicker,
            "formula" => Self::Formula,
            "display" => Self::Display,
            "divider" => Self::Divider,
            "html" => Self::Html,
            "static" => Self::Static,
            "group" => Self::Group,
            "fieldset" => Self::Fieldset,
            "tabs" => Self::Tabs,
            "panel" => Self::Panel,
            "collapse" => Self::Collapse,
            "repeatable" => Self::Repeatable,
            "table_repeater" => Self::TableRepeater,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

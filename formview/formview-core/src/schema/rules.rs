use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation constraints declared on a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldValidation {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    pub format: Option<ValueFormat>,

    pub min: Option<f64>,
    pub max: Option<f64>,
    pub exclusive_min: bool,
    pub exclusive_max: bool,
    pub step: Option<f64>,
    pub multiple_of: Option<f64>,
    pub integer: bool,
    pub positive: bool,
    pub negative: bool,

    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub unique_items: bool,

    /// Value must be unique across stored records; checked server-side.
    pub unique: bool,
    /// Server-side expression; never evaluated locally.
    pub custom: Option<String>,

    pub file: Option<FileValidation>,
    pub messages: Option<ValidationMessages>,
}

impl FieldValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn custom(mut self, expr: impl Into<String>) -> Self {
        self.custom = Some(expr.into());
        self
    }

    pub fn messages(mut self, messages: ValidationMessages) -> Self {
        self.messages = Some(messages);
        self
    }
}

/// Upload constraints for file fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileValidation {
    /// Maximum size per file in bytes.
    pub max_size: Option<u64>,
    pub accept: Vec<String>,
    pub max_files: Option<usize>,
}

/// Message overrides for individual checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationMessages {
    pub required: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub pattern: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub custom: Option<String>,
}

/// Well-known string formats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueFormat {
    Email,
    Url,
    Uuid,
    Date,
    DateTime,
    Time,
    Phone,
    Color,
    /// Unknown/custom format; accepted without checking
    Other(String),
}

impl ValueFormat {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::Uuid => "uuid",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Phone => "phone",
            Self::Color => "color",
            Self::Other(s) => s,
        }
    }

    /// Formats a browser can check without a server round-trip.
    pub fn is_client_checkable(&self) -> bool {
        matches!(
            self,
            Self::Email
                | Self::Url
                | Self::Phone
                | Self::Date
                | Self::Time
                | Self::DateTime
                | Self::Color
        )
    }
}

impl From<&str> for ValueFormat {
    fn from(s: &str) -> Self {
        match s {
            "email" => Self::Email,
            "url" | "uri" => Self::Url,
            "uuid" => Self::Uuid,
            "date" => Self::Date,
            "datetime" | "date-time" => Self::DateTime,
            "time" => Self::Time,
            "phone" => Self::Phone,
            "color" => Self::Color,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ValueFormat {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ValueFormat> for String {
    fn from(f: ValueFormat) -> Self {
        f.as_str().to_string()
    }
}

impl fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

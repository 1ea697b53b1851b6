//! Strongly typed design-token table attached to presentation records.

use std::{collections::BTreeMap, fmt};

/// Token slots a renderer may style a field with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKey {
    FieldBackground,
    FieldBorder,
    FieldText,
    FieldRadius,
    FieldSpacing,
    FieldShadow,
    ValidationColor,
    ValidationMessage,
    ValidationIcon,
}

impl TokenKey {
    /// Dotted name used when exporting tokens as CSS custom properties.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FieldBackground => "field.background",
            Self::FieldBorder => "field.border",
            Self::FieldText => "field.text",
            Self::FieldRadius => "field.radius",
            Self::FieldSpacing => "field.spacing",
            Self::FieldShadow => "field.shadow",
            Self::ValidationColor => "validation.color",
            Self::ValidationMessage => "validation.message",
            Self::ValidationIcon => "validation.icon",
        }
    }

    /// CSS custom property name, e.g. `--field-border`.
    pub fn css_var(&self) -> String {
        format!("--{}", self.as_str().replace('.', "-"))
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved token values keyed by [`TokenKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable(BTreeMap<TokenKey, String>);

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: TokenKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn set(&mut self, key: TokenKey, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    /// Insert only when `key` has no value yet.
    pub fn set_if_absent(&mut self, key: TokenKey, value: impl Into<String>) {
        self.0.entry(key).or_insert_with(|| value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Inline `style` declaration for the color/size tokens (`--field-border:#dc2626;...`).
    ///
    /// Message and icon slots are text, not style, and are skipped.
    pub fn to_style(&self) -> String {
        self.iter()
            .filter(|(k, _)| !matches!(k, TokenKey::ValidationMessage | TokenKey::ValidationIcon))
            .map(|(k, v)| format!("{}:{v};", k.css_var()))
            .collect()
    }
}

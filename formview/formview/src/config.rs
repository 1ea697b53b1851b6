//! Render-time configuration shared by the mapper and the template renderer.

use serde::Deserialize;

/// Locale, theme and validation wiring for one rendering setup.
///
/// Deserializes from a partial document; missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Active locale for display strings.
    pub locale: String,
    /// Locale the schema's plain strings are written in.
    pub default_locale: String,
    pub theme: String,
    pub dark_mode: bool,
    /// Base URL of the server-side validation endpoint.
    pub validation_endpoint: String,
    /// Debounce before async validation when no orchestrator supplies one.
    pub debounce_ms: u64,
    pub validate_on_blur: bool,
    pub validate_on_input: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            default_locale: "en".to_string(),
            theme: "default".to_string(),
            dark_mode: false,
            validation_endpoint: "/api/validate".to_string(),
            debounce_ms: 300,
            validate_on_blur: true,
            validate_on_input: false,
        }
    }
}

impl RenderConfig {
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    pub fn with_validation_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.validation_endpoint = endpoint.into();
        self
    }

    /// Endpoint used to validate `field` server-side.
    pub fn field_validation_url(&self, field: &str) -> String {
        format!(
            "{}/field/{field}",
            self.validation_endpoint.trim_end_matches('/')
        )
    }
}

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use formview::RenderConfig;

const DEFAULT_CONFIG: &str = r#"
locale = "en"
default_locale = "en"
theme = "default"
dark_mode = false
validation_endpoint = "/api/validate"
debounce_ms = 300
validate_on_blur = true
validate_on_input = false
"#;

#[derive(Args)]
pub struct ConfigArgs {
    /// Render settings as TOML (built-in defaults if not specified)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Locale for labels and help texts
    #[arg(long)]
    locale: Option<String>,

    /// Render in dark mode
    #[arg(long)]
    dark: bool,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<RenderConfig> {
        let mut config: RenderConfig = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => toml::from_str(DEFAULT_CONFIG).context("invalid built-in config")?,
        };

        if let Some(locale) = &self.locale {
            config.locale = locale.clone();
        }
        if self.dark {
            config.dark_mode = true;
        }
        tracing::debug!(locale = %config.locale, dark = config.dark_mode, "loaded render config");
        Ok(config)
    }
}

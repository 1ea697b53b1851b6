use std::{fs, path::Path};

use anyhow::{Context, Result};
use formview::{FormData, core::Schema};

pub fn load_schema(path: &Path) -> Result<Schema> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    Schema::from_json(&text).with_context(|| format!("invalid schema {}", path.display()))
}

/// Form data file: `{"values": {...}, "errors": {...}}`, both optional.
pub fn load_data(path: Option<&Path>) -> Result<FormData> {
    let Some(path) = path else {
        return Ok(FormData::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read data {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid data {}", path.display()))
}

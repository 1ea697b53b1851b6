use std::{path::PathBuf, sync::Arc};

use anyhow::{Result, bail};
use clap::Args;
use formview::{StateManager, core::FormContext};

use crate::input::{load_data, load_schema};

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the schema JSON
    schema: PathBuf,

    /// Form data JSON with values
    data: PathBuf,

    /// Exit with an error when the data is invalid
    #[arg(long)]
    strict: bool,
}

impl ValidateArgs {
    pub fn run(self) -> Result<()> {
        let schema = Arc::new(load_schema(&self.schema)?);
        let data = load_data(Some(&self.data))?;
        let state = StateManager::new(schema, data.values)?;

        if let Err(e) = state.validate_all(&FormContext::background()) {
            tracing::debug!(error = %e, "form data has validation errors");
        }
        let snapshot = state.snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);

        if self.strict && !snapshot.valid {
            bail!("{} field(s) failed validation", snapshot.errors.len());
        }
        Ok(())
    }
}

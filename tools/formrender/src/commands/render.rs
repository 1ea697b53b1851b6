use std::{fs, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Args;
use formview::{StateManager, core::FormContext};

use crate::{
    config::ConfigArgs,
    input::{load_data, load_schema},
};

#[derive(Args)]
pub struct RenderArgs {
    /// Path to the schema JSON
    schema: PathBuf,

    /// Form data JSON with values and errors
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Validate the data and render from form state, with an error summary
    #[arg(long)]
    validate: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let config = self.config.load()?;
        let schema = Arc::new(load_schema(&self.schema)?);
        let data = load_data(self.data.as_deref())?;
        let ctx = FormContext::background();
        let renderer = super::renderer(config);

        let html = if self.validate {
            let state = Arc::new(StateManager::new(Arc::clone(&schema), data.values)?);
            if let Err(e) = state.validate_all(&ctx) {
                tracing::debug!(error = %e, "form data has validation errors");
            }
            let summary = renderer.render_errors(&ctx, &state.get_all_errors())?;
            let form = renderer
                .with_state_manager(state)
                .render_form(&ctx, Some(&schema), &Default::default())?;
            format!("{summary}{form}")
        } else {
            renderer.render_form(&ctx, Some(&schema), &data)?
        };

        match self.output {
            Some(path) => fs::write(path, format!("{html}\n"))?,
            None => println!("{html}"),
        }
        Ok(())
    }
}

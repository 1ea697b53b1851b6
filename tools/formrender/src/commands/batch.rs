use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use formview::{
    TemplateRenderer,
    core::{FormContext, Schema},
};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::{
    config::ConfigArgs,
    input::{load_data, load_schema},
};

#[derive(Args)]
pub struct BatchArgs {
    /// Path to the schema JSON
    schema: PathBuf,

    /// Form data JSON files
    #[arg(required = true)]
    data: Vec<PathBuf>,

    /// Directory receiving one `<name>.html` per data file
    #[arg(short, long)]
    out_dir: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,
}

impl BatchArgs {
    pub fn run(self) -> Result<()> {
        let config = self.config.load()?;
        let schema = load_schema(&self.schema)?;
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;
        let renderer = super::renderer(config);

        let pb = ProgressBar::new(self.data.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, ETA: {eta})",
            )?
            .progress_chars("=>-"),
        );

        let failures: Vec<(&PathBuf, anyhow::Error)> = self
            .data
            .par_iter()
            .filter_map(|path| {
                let result = render_one(&renderer, &schema, path, &self.out_dir);
                pb.inc(1);
                result.err().map(|e| (path, e))
            })
            .collect();
        pb.finish_with_message("done");

        for (path, e) in &failures {
            eprintln!("Error: {}: {e:#}", path.display());
        }
        if !failures.is_empty() {
            bail!("{} of {} files failed", failures.len(), self.data.len());
        }
        Ok(())
    }
}

fn render_one(
    renderer: &TemplateRenderer,
    schema: &Schema,
    path: &Path,
    out_dir: &Path,
) -> Result<()> {
    let data = load_data(Some(path))?;
    let html = renderer.render_form(&FormContext::background(), Some(schema), &data)?;

    let stem = path
        .file_stem()
        .ok_or_else(|| anyhow!("{} has no file name", path.display()))?;
    let out = out_dir.join(format!("{}.html", stem.to_string_lossy()));
    fs::write(&out, format!("{html}\n"))
        .with_context(|| format!("failed to write {}", out.display()))?;
    tracing::debug!(input = %path.display(), output = %out.display(), "rendered");
    Ok(())
}

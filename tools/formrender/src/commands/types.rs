use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use formview::ComponentRegistry;
use serde_json::json;

#[derive(Args)]
pub struct TypesArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

impl TypesArgs {
    pub fn run(self) -> Result<()> {
        let registry = ComponentRegistry::with_defaults();
        let bindings: BTreeMap<String, String> = registry
            .renderer_info()
            .into_iter()
            .map(|(field_type, description)| (field_type.to_string(), description))
            .collect();
        let fallbacks = registry.fallback_info();

        if self.json {
            let doc = json!({ "types": bindings, "fallbacks": fallbacks });
            println!("{}", serde_json::to_string_pretty(&doc)?);
            return Ok(());
        }

        for (field_type, description) in &bindings {
            println!("{field_type:<14} {description}");
        }
        for description in &fallbacks {
            println!("{:<14} {description}", "*");
        }
        Ok(())
    }
}

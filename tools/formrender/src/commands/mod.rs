pub mod batch;
pub mod render;
pub mod types;
pub mod validate;

use std::sync::Arc;

use formview::{ComponentRegistry, RenderConfig, TemplateRenderer};

/// Template renderer over the built-in HTML renderers.
fn renderer(config: RenderConfig) -> TemplateRenderer {
    TemplateRenderer::new(Arc::new(ComponentRegistry::with_defaults())).with_config(config)
}

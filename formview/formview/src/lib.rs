//! Render form schemas into markup.
//!
//! A [`TemplateRenderer`] walks a [`Schema`](formview_core::Schema), turns
//! every field into a [`FieldProps`](formview_core::FieldProps) with the
//! [`FieldMapper`], resolves a renderer through the [`ComponentRegistry`] and
//! assembles the results into a `<form>`. Live form state is kept by a
//! [`StateManager`] that can be shared across threads.
//!
//! With the default `html` feature the registry can be populated with the
//! renderers from `formview-html`:
//!
//! ```ignore
//! let registry = Arc::new(ComponentRegistry::with_defaults());
//! let renderer = TemplateRenderer::new(registry);
//! let html = renderer.render_form(&FormContext::background(), Some(&schema), &FormData::new())?;
//! ```

mod config;
mod error;
mod mapper;
mod registry;
mod state;
mod template;
mod tokens;
mod tracker;

pub use config::RenderConfig;
pub use error::{MapperError, RegistryError, StateError, TemplateError};
pub use formview_core as core;
#[cfg(feature = "html")]
pub use formview_html as html;
pub use mapper::{FieldMapper, KindMapping, field_id, map_field_type};
pub use registry::{
    ComponentConfig, ComponentRegistry, ComponentRegistryBuilder, DEFAULT_PRIORITY,
    FALLBACK_PRIORITY,
};
pub use state::{FormStateSnapshot, StateManager, ValidationSummary, values_equal};
pub use template::{FormData, TemplateRenderer, validation_classes};
pub use tokens::validation_tokens;
pub use tracker::ValidationTracker;

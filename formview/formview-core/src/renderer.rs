//! Renderer trait implemented by markup plugins.

use crate::{context::FormContext, error::RenderError, field_type::FieldType, props::FieldProps};

/// Produces markup for one field from its presentation record.
///
/// Implementations are registered with `formview::ComponentRegistry` under
/// one or more field types and shared across threads, so they must not keep
/// per-render state.
pub trait FieldRenderer: Send + Sync {
    /// Render `props` to a markup fragment.
    fn render(&self, ctx: &FormContext, props: &FieldProps) -> Result<String, RenderError>;

    /// Whether this renderer can draw fields of `field_type`.
    ///
    /// Consulted when the renderer is registered as a fallback.
    fn supports_type(&self, field_type: &FieldType) -> bool;

    /// Short human-readable description used in registry listings.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

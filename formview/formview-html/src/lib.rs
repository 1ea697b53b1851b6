//! HTML [`FieldRenderer`] implementations for the formview pipeline.
//!
//! [`TypedFieldRenderer`] binds one [`FieldKind`] and accepts any field type,
//! which lets the registry reuse a single implementation under many type tags.
//! [`HtmlFieldRenderer`] draws the kind carried by the presentation record.

mod attrs;
mod controls;

use formview_core::{FieldKind, FieldProps, FieldRenderer, FieldType, FormContext, RenderError};

/// Renders a field as the kind recorded in its props.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFieldRenderer;

impl HtmlFieldRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl FieldRenderer for HtmlFieldRenderer {
    fn render(&self, ctx: &FormContext, props: &FieldProps) -> Result<String, RenderError> {
        controls::render_field(ctx, props.kind, props)
    }

    fn supports_type(&self, _field_type: &FieldType) -> bool {
        true
    }

    fn describe(&self) -> String {
        "HTML field renderer".to_string()
    }
}

/// Renders every field as one fixed [`FieldKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedFieldRenderer {
    kind: FieldKind,
}

impl TypedFieldRenderer {
    pub fn new(kind: FieldKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}

impl FieldRenderer for TypedFieldRenderer {
    fn render(&self, ctx: &FormContext, props: &FieldProps) -> Result<String, RenderError> {
        controls::render_field(ctx, self.kind, props)
    }

    fn supports_type(&self, _field_type: &FieldType) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("HTML {} input", self.kind)
    }
}

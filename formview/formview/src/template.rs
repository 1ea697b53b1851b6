//! Form, layout and per-field markup composition.

use std::{collections::BTreeMap, fmt::Write, sync::Arc};

use formview_core::{
    Action, ButtonProps, ClientValidationRules, Field, FieldProps, FormContext, Group, Layout,
    LayoutType, Schema, Section, Step, Tab, ValidationOrchestrator, ValidationState, Value,
    escape_attr, escape_text,
};
use serde::Deserialize;

use crate::{
    config::RenderConfig, error::TemplateError, mapper::FieldMapper, registry::ComponentRegistry,
    state::StateManager, tokens::validation_tokens,
};

/// Caller-supplied values and errors for stateless rendering.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormData {
    pub values: BTreeMap<String, Value>,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn with_errors<I, S>(mut self, field: impl Into<String>, errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors
            .insert(field.into(), errors.into_iter().map(Into::into).collect());
        self
    }
}

/// Walks a schema and assembles the markup of a whole form.
///
/// Each field goes through the mapper, the registry and the resolved
/// renderer. With a [`StateManager`] attached, live state is read per field;
/// otherwise values and errors come from the [`FormData`] passed in. Any
/// field failure aborts the render.
pub struct TemplateRenderer {
    registry: Arc<ComponentRegistry>,
    mapper: FieldMapper,
    config: RenderConfig,
    state: Option<Arc<StateManager>>,
    orchestrator: Option<Arc<dyn ValidationOrchestrator>>,
}

impl TemplateRenderer {
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self {
            registry,
            mapper: FieldMapper::new(),
            config: RenderConfig::default(),
            state: None,
            orchestrator: None,
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.mapper = FieldMapper::from_config(config.clone());
        self.config = config;
        self
    }

    pub fn with_state_manager(mut self, state: Arc<StateManager>) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_orchestrator(mut self, orchestrator: Arc<dyn ValidationOrchestrator>) -> Self {
        self.orchestrator = Some(orchestrator);
        self
    }

    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    pub fn mapper(&self) -> &FieldMapper {
        &self.mapper
    }

    /// Render one field without its container.
    ///
    /// With a state manager attached its live state is used, except that a
    /// non-null `value` or a non-empty `errors` passed here wins.
    pub fn render_field(
        &self,
        ctx: &FormContext,
        field: Option<&Field>,
        value: Option<&Value>,
        errors: &[String],
        touched: bool,
        dirty: bool,
    ) -> Result<String, TemplateError> {
        let field = field.ok_or(TemplateError::Nil { what: "field" })?;
        tracing::trace!(field = %field.name, field_type = %field.field_type, "rendering field");

        let explicit_value = value.filter(|v| !v.is_null());
        let (value, errors, touched, dirty) = match &self.state {
            Some(sm) => (
                explicit_value
                    .cloned()
                    .or_else(|| sm.get_value(&field.name)),
                if errors.is_empty() {
                    sm.get_field_errors(&field.name)
                } else {
                    errors.to_vec()
                },
                sm.is_field_touched(&field.name),
                sm.is_field_dirty(&field.name),
            ),
            None => (explicit_value.cloned(), errors.to_vec(), touched, dirty),
        };

        let mut props = self
            .mapper
            .convert(ctx, Some(field), value.as_ref(), &errors, touched, dirty)
            .map_err(|source| TemplateError::Convert {
                field: field.name.clone(),
                source,
            })?;
        self.enhance_props(ctx, field, &mut props);

        let renderer = self
            .registry
            .resolve(field)
            .map_err(|source| TemplateError::Resolve {
                field: field.name.clone(),
                field_type: field.field_type.clone(),
                source,
            })?;

        renderer
            .render(ctx, &props)
            .map_err(|source| TemplateError::Render {
                field: field.name.clone(),
                source,
            })
    }

    /// Render a complete `<form>`: fields (through the layout if any), then
    /// the action bar. Nothing is returned unless every part rendered.
    pub fn render_form(
        &self,
        ctx: &FormContext,
        schema: Option<&Schema>,
        data: &FormData,
    ) -> Result<String, TemplateError> {
        let schema = schema.ok_or(TemplateError::Nil { what: "schema" })?;
        tracing::debug!(
            schema = %schema.id,
            fields = schema.fields.len(),
            stateful = self.state.is_some(),
            "rendering form"
        );

        let mut out = String::new();
        writeln!(out, "<form {}>", form_attributes(schema))?;

        let fields: Vec<&Field> = schema.fields.iter().collect();
        match &schema.layout {
            Some(layout) => out.push_str(&self.render_layout(ctx, Some(layout), &fields, data)?),
            None => out.push_str(&self.render_fields(ctx, &fields, data)?),
        }

        if !schema.actions.is_empty() {
            out.push_str(r#"<div class="form-actions">"#);
            for action in &schema.actions {
                out.push_str(&self.render_action(ctx, Some(action), true)?);
            }
            out.push_str("</div>");
        }

        out.push_str("</form>");
        Ok(out)
    }

    /// Render an action as a button.
    pub fn render_action(
        &self,
        _ctx: &FormContext,
        action: Option<&Action>,
        enabled: bool,
    ) -> Result<String, TemplateError> {
        let action = action.ok_or(TemplateError::Nil { what: "action" })?;
        let props = self
            .mapper
            .convert_action(Some(action), enabled)
            .map_err(|source| TemplateError::Convert {
                field: action.id.clone(),
                source,
            })?;
        Ok(button_markup(&props)?)
    }

    /// Render `fields` arranged by `layout`.
    ///
    /// Grid layouts wrap every field in one grid. Section, tab, step and
    /// group layouts render each container with its member fields, followed
    /// by the fields no container claims. Any other layout renders the plain
    /// field list.
    pub fn render_layout(
        &self,
        ctx: &FormContext,
        layout: Option<&Layout>,
        fields: &[&Field],
        data: &FormData,
    ) -> Result<String, TemplateError> {
        let layout = layout.ok_or(TemplateError::Nil { what: "layout" })?;

        let mut out = String::new();
        let mut claimed: Vec<&str> = Vec::new();
        match layout.layout_type {
            LayoutType::Grid => {
                let columns = layout.columns.max(1);
                write!(out, r#"<div class="grid grid-cols-{columns} gap-4">"#)?;
                out.push_str(&self.render_fields(ctx, fields, data)?);
                out.push_str("</div>");
                return Ok(out);
            }
            LayoutType::Sections => {
                for section in &layout.sections {
                    let members = members_of(fields, "section", &section.id, &section.fields)?;
                    out.push_str(&self.render_section(ctx, Some(section), &members, data)?);
                    claimed.extend(section.fields.iter().map(String::as_str));
                }
            }
            LayoutType::Tabs => {
                for tab in &layout.tabs {
                    let members = members_of(fields, "tab", &tab.id, &tab.fields)?;
                    out.push_str(&self.render_tab(ctx, Some(tab), &members, data)?);
                    claimed.extend(tab.fields.iter().map(String::as_str));
                }
            }
            LayoutType::Steps => {
                for step in &layout.steps {
                    let members = members_of(fields, "step", &step.id, &step.fields)?;
                    out.push_str(&self.render_step(ctx, Some(step), &members, data)?);
                    claimed.extend(step.fields.iter().map(String::as_str));
                }
            }
            LayoutType::Groups => {
                for group in &layout.groups {
                    let members = members_of(fields, "group", &group.id, &group.fields)?;
                    out.push_str(&self.render_group(ctx, Some(group), &members, data)?);
                    claimed.extend(group.fields.iter().map(String::as_str));
                }
            }
            LayoutType::Flex => {}
        }

        let rest: Vec<&Field> = fields
            .iter()
            .copied()
            .filter(|f| !claimed.contains(&f.name.as_str()))
            .collect();
        out.push_str(&self.render_fields(ctx, &rest, data)?);
        Ok(out)
    }

    pub fn render_section(
        &self,
        ctx: &FormContext,
        section: Option<&Section>,
        fields: &[&Field],
        data: &FormData,
    ) -> Result<String, TemplateError> {
        let section = section.ok_or(TemplateError::Nil { what: "section" })?;
        let mut out = String::new();
        write!(
            out,
            r#"<div class="form-section" data-section-id="{}">"#,
            escape_attr(&section.id)
        )?;
        if !section.title.is_empty() {
            write!(out, r#"<h3 class="section-title">{}</h3>"#, escape_text(&section.title))?;
        }
        if !section.description.is_empty() {
            write!(
                out,
                r#"<p class="section-description">{}</p>"#,
                escape_text(&section.description)
            )?;
        }
        out.push_str(&self.render_fields(ctx, fields, data)?);
        out.push_str("</div>");
        Ok(out)
    }

    pub fn render_tab(
        &self,
        ctx: &FormContext,
        tab: Option<&Tab>,
        fields: &[&Field],
        data: &FormData,
    ) -> Result<String, TemplateError> {
        let tab = tab.ok_or(TemplateError::Nil { what: "tab" })?;
        let mut out = String::new();
        write!(
            out,
            r#"<div class="tab-content" data-tab-id="{}">"#,
            escape_attr(&tab.id)
        )?;
        out.push_str(&self.render_fields(ctx, fields, data)?);
        out.push_str("</div>");
        Ok(out)
    }

    pub fn render_step(
        &self,
        ctx: &FormContext,
        step: Option<&Step>,
        fields: &[&Field],
        data: &FormData,
    ) -> Result<String, TemplateError> {
        let step = step.ok_or(TemplateError::Nil { what: "step" })?;
        let mut out = String::new();
        write!(
            out,
            r#"<div class="form-step" data-step-id="{}">"#,
            escape_attr(&step.id)
        )?;
        if !step.title.is_empty() {
            write!(out, r#"<h3 class="step-title">{}</h3>"#, escape_text(&step.title))?;
        }
        out.push_str(&self.render_fields(ctx, fields, data)?);
        out.push_str("</div>");
        Ok(out)
    }

    pub fn render_group(
        &self,
        ctx: &FormContext,
        group: Option<&Group>,
        fields: &[&Field],
        data: &FormData,
    ) -> Result<String, TemplateError> {
        let group = group.ok_or(TemplateError::Nil { what: "group" })?;
        let class = if group.border {
            "form-group form-group-bordered"
        } else {
            "form-group"
        };
        let mut out = String::new();
        write!(
            out,
            r#"<div class="{class}" data-group-id="{}">"#,
            escape_attr(&group.id)
        )?;
        if !group.label.is_empty() {
            write!(out, r#"<h4 class="group-label">{}</h4>"#, escape_text(&group.label))?;
        }
        if !group.description.is_empty() {
            write!(
                out,
                r#"<p class="group-description">{}</p>"#,
                escape_text(&group.description)
            )?;
        }
        out.push_str(&self.render_fields(ctx, fields, data)?);
        out.push_str("</div>");
        Ok(out)
    }

    /// Form-level error summary; empty when no field has errors.
    pub fn render_errors(
        &self,
        _ctx: &FormContext,
        errors: &BTreeMap<String, Vec<String>>,
    ) -> Result<String, TemplateError> {
        let mut entries = errors.iter().filter(|(_, e)| !e.is_empty()).peekable();
        if entries.peek().is_none() {
            return Ok(String::new());
        }

        let mut out = String::from(r#"<div class="form-errors">"#);
        for (field, messages) in entries {
            write!(
                out,
                r#"<div class="field-errors" data-field="{}"><span class="field-name">{}:</span><ul class="error-list">"#,
                escape_attr(field),
                escape_text(field)
            )?;
            for message in messages {
                write!(out, r#"<li class="error-item">{}</li>"#, escape_text(message))?;
            }
            out.push_str("</ul></div>");
        }
        out.push_str("</div>");
        Ok(out)
    }

    fn render_fields(
        &self,
        ctx: &FormContext,
        fields: &[&Field],
        data: &FormData,
    ) -> Result<String, TemplateError> {
        let mut out = String::new();
        for &field in fields {
            let html = match &self.state {
                Some(_) => self.render_field(ctx, Some(field), None, &[], false, false)?,
                None => {
                    let errors = data
                        .errors
                        .get(&field.name)
                        .map(Vec::as_slice)
                        .unwrap_or_default();
                    self.render_field(
                        ctx,
                        Some(field),
                        data.values.get(&field.name),
                        errors,
                        false,
                        false,
                    )?
                }
            };
            writeln!(
                out,
                r#"<div class="field-container" data-field="{}"{}>{html}</div>"#,
                escape_attr(&field.name),
                self.container_attributes(&field.name)
            )?;
        }
        Ok(out)
    }

    fn container_attributes(&self, field: &str) -> String {
        let mut attrs = String::new();
        if let Some(state) = self.validation_state(field) {
            attrs.push_str(&format!(r#" data-validation-state="{state}""#));
        }
        if let Some(orchestrator) = &self.orchestrator
            && orchestrator.pending_validations().iter().any(|p| p == field)
        {
            attrs.push_str(r#" data-validation-pending="true""#);
        }
        attrs
    }

    /// UI state from the orchestrator, else whatever the state manager
    /// recorded.
    fn validation_state(&self, field: &str) -> Option<ValidationState> {
        match (&self.orchestrator, &self.state) {
            (Some(orchestrator), _) => Some(orchestrator.validation_state_for_field(field)),
            (None, Some(sm)) => sm.recorded_validation_state(field),
            (None, None) => None,
        }
    }

    fn enhance_props(&self, ctx: &FormContext, field: &Field, props: &mut FieldProps) {
        let state = self.validation_state(&field.name).unwrap_or_default();
        props.validation_state = state;
        props.dark_mode = ctx.dark_mode() || self.config.dark_mode;
        if let Some(theme) = ctx.theme() {
            props.theme_id = theme.to_string();
        }
        props.tokens = validation_tokens(state, props.dark_mode);
        if let Some(class) = state.css_class() {
            props.add_class(class);
        }

        if let Some(orchestrator) = &self.orchestrator {
            props.validation_loading = orchestrator.is_field_validating(&field.name);
            let errors = orchestrator.field_errors(&field.name);
            if !errors.is_empty() {
                props.error_text = errors.join("; ");
                props.errors = errors;
            }
        }

        let rules = self.mapper.extract_client_validation_rules(field);
        let is_async = rules.has_async()
            || self
                .orchestrator
                .as_ref()
                .is_some_and(|o| o.has_async_validation(&field.name));
        if is_async {
            props.on_validate = Some(self.config.field_validation_url(&field.name));
            props.validation_debounce_ms = Some(match &self.orchestrator {
                Some(o) => u64::try_from(o.debounce_for_field(&field.name).as_millis())
                    .unwrap_or(u64::MAX),
                None => self.config.debounce_ms,
            });
        }
        if rules.is_empty() {
            return;
        }
        for class in validation_classes(&rules) {
            props.add_class(&class);
        }
        props.client_rules = Some(rules);
    }
}

/// `validate-*` hook classes for client-side validation scripts.
pub fn validation_classes(rules: &ClientValidationRules) -> Vec<String> {
    let mut classes = Vec::new();
    if rules.required {
        classes.push("validate-required".to_string());
    }
    if let Some(n) = rules.min_length {
        classes.push(format!("validate-min-length-{n}"));
    }
    if let Some(n) = rules.max_length {
        classes.push(format!("validate-max-length-{n}"));
    }
    if rules.pattern.is_some() {
        classes.push("validate-pattern".to_string());
    }
    if let Some(format) = &rules.format {
        classes.push(format!("validate-format-{format}"));
    }
    if let Some(n) = rules.min {
        classes.push(format!("validate-min-{n:.2}"));
    }
    if let Some(n) = rules.max {
        classes.push(format!("validate-max-{n:.2}"));
    }
    classes
}

fn form_attributes(schema: &Schema) -> String {
    let mut attrs = Vec::new();
    if !schema.id.is_empty() {
        attrs.push(format!(r#"id="{}""#, escape_attr(&schema.id)));
    }
    attrs.push(r#"class="schema-form""#.to_string());
    attrs.push(format!(
        r#"data-schema-type="{}""#,
        escape_attr(&schema.schema_type)
    ));
    if let Some(config) = &schema.config {
        for (name, value) in [
            ("method", &config.method),
            ("action", &config.action),
            ("hx-target", &config.target),
        ] {
            if !value.is_empty() {
                attrs.push(format!(r#"{name}="{}""#, escape_attr(value)));
            }
        }
    }
    attrs.join(" ")
}

fn button_markup(props: &ButtonProps) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write!(
        out,
        r#"<button type="{}" id="{}" class="btn btn-{} {}""#,
        props.button_type,
        escape_attr(&props.id),
        escape_attr(&props.variant),
        escape_attr(&props.class)
    )?;
    if !props.enabled {
        out.push_str(" disabled");
    }
    write!(out, ">{}</button>", escape_text(&props.text))?;
    Ok(out)
}

/// Resolve a container's member names against `fields`, in member order.
fn members_of<'a>(
    fields: &[&'a Field],
    container: &'static str,
    id: &str,
    names: &[String],
) -> Result<Vec<&'a Field>, TemplateError> {
    names
        .iter()
        .map(|name| {
            fields
                .iter()
                .copied()
                .find(|f| &f.name == name)
                .ok_or_else(|| TemplateError::UnknownLayoutField {
                    container,
                    id: id.to_string(),
                    field: name.clone(),
                })
        })
        .collect()
}

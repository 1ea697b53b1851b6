//! Per-kind HTML markup for a single field.

use std::fmt::Write;

use formview_core::{
    FieldConfig, FieldKind, FieldProps, FormContext, RenderError, SelectOption, TokenKey,
    ValidationState, escape_text,
};
use tracing::trace;

use crate::attrs::{attr, attr_opt, class_list, flag};

const DEFAULT_TEXTAREA_ROWS: u32 = 3;
const DEFAULT_DEBOUNCE_MS: u64 = 300;

pub(crate) fn render_field(
    ctx: &FormContext,
    kind: FieldKind,
    props: &FieldProps,
) -> Result<String, RenderError> {
    if props.name.is_empty() {
        return Err(RenderError::Unsupported {
            field: props.id.clone(),
            detail: "field has no name".to_string(),
        });
    }
    trace!(field = %props.name, kind = %kind, "rendering field");

    let mut out = String::new();
    if props.hidden {
        out.push_str(r#"<input type="hidden""#);
        attr_opt(&mut out, "id", &props.id)?;
        attr(&mut out, "name", &props.name)?;
        attr(&mut out, "value", &props.value)?;
        out.push('>');
        return Ok(out);
    }

    let kind_class = format!("form-field-{kind}");
    out.push_str("<div");
    attr(
        &mut out,
        "class",
        &class_list(&["form-field", kind_class.as_str(), props.class.as_str()]),
    )?;
    attr_opt(&mut out, "style", &props.tokens.to_style())?;
    if ctx.dark_mode() || props.dark_mode {
        attr(&mut out, "data-theme", "dark")?;
    }
    out.push('>');

    match kind {
        FieldKind::Checkbox => {
            checkbox(&mut out, props)?;
            label(&mut out, props)?;
        }
        _ => {
            label(&mut out, props)?;
            control(&mut out, kind, props)?;
        }
    }
    feedback(&mut out, props)?;
    out.push_str("</div>");
    Ok(out)
}

fn control(out: &mut String, kind: FieldKind, props: &FieldProps) -> Result<(), RenderError> {
    match kind {
        FieldKind::Textarea => textarea(out, props),
        FieldKind::Select => select(out, props, false),
        FieldKind::MultiSelect => select(out, props, true),
        FieldKind::Radio => option_group(out, props, "radio"),
        FieldKind::CheckboxGroup => option_group(out, props, "checkbox"),
        FieldKind::Checkbox => checkbox(out, props),
        FieldKind::AutoComplete => autocomplete(out, props),
        FieldKind::File => file(out, props),
        FieldKind::Tags => tags(out, props),
        FieldKind::DateRange => date_range(out, props),
        FieldKind::Range => range(out, props),
        FieldKind::Text
        | FieldKind::Email
        | FieldKind::Password
        | FieldKind::Number
        | FieldKind::Tel
        | FieldKind::Url
        | FieldKind::Date
        | FieldKind::Time
        | FieldKind::DateTime
        | FieldKind::Color => input(out, kind.as_str(), props),
    }
}

fn label(out: &mut String, props: &FieldProps) -> Result<(), RenderError> {
    if props.label.is_empty() {
        return Ok(());
    }
    out.push_str("<label");
    attr_opt(out, "for", &props.id)?;
    attr(
        out,
        "class",
        &class_list(&["form-label", props.label_class.as_str()]),
    )?;
    attr_opt(out, "title", &props.tooltip)?;
    out.push('>');
    out.push_str(&escape_text(&props.label));
    if props.required {
        out.push_str(r#"<span class="form-required" aria-hidden="true">*</span>"#);
    }
    out.push_str("</label>");
    Ok(())
}

/// Attributes shared by every focusable control.
fn common_attrs(out: &mut String, props: &FieldProps, base_class: &str) -> Result<(), RenderError> {
    attr_opt(out, "id", &props.id)?;
    attr(out, "name", &props.name)?;
    attr(
        out,
        "class",
        &class_list(&[base_class, props.input_class.as_str()]),
    )?;
    flag(out, "required", props.required);
    flag(out, "disabled", props.disabled);
    flag(out, "readonly", props.readonly);

    let mut described_by = Vec::new();
    if !props.help_text.is_empty() {
        described_by.push(format!("{}-help", props.id));
    }
    if props.has_errors() {
        attr(out, "aria-invalid", "true")?;
        described_by.push(format!("{}-error", props.id));
    }
    attr_opt(out, "aria-describedby", &described_by.join(" "))?;

    if let Some(url) = &props.on_validate {
        let delay = props.validation_debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS);
        let mut triggers = Vec::new();
        if props.validate_on_blur {
            triggers.push("blur".to_string());
        }
        if props.validate_on_input {
            triggers.push(format!("input changed delay:{delay}ms"));
        }
        if triggers.is_empty() {
            triggers.push("change".to_string());
        }
        attr(out, "hx-post", url)?;
        attr(out, "hx-trigger", &triggers.join(", "))?;
        attr(out, "hx-target", "closest .field-container")?;
        attr(out, "hx-swap", "outerHTML")?;
    }
    Ok(())
}

fn constraint_attrs(out: &mut String, props: &FieldProps) -> Result<(), RenderError> {
    if let Some(n) = props.min_length {
        attr(out, "minlength", &n.to_string())?;
    }
    if let Some(n) = props.max_length {
        attr(out, "maxlength", &n.to_string())?;
    }
    if let Some(p) = &props.pattern {
        attr(out, "pattern", p)?;
    }
    let (min_date, max_date) = match &props.config {
        Some(FieldConfig::DateTime(opts)) => (opts.min_date.as_deref(), opts.max_date.as_deref()),
        _ => (None, None),
    };
    if let Some(min) = props.min.as_deref().or(min_date) {
        attr(out, "min", min)?;
    }
    if let Some(max) = props.max.as_deref().or(max_date) {
        attr(out, "max", max)?;
    }
    if let Some(step) = &props.step {
        attr(out, "step", step)?;
    }
    Ok(())
}

fn input(out: &mut String, input_type: &str, props: &FieldProps) -> Result<(), RenderError> {
    write!(out, r#"<input type="{input_type}""#)?;
    common_attrs(out, props, "form-input")?;
    // Passwords are never echoed back.
    if input_type != "password" {
        attr_opt(out, "value", &props.value)?;
    }
    attr_opt(out, "placeholder", &props.placeholder)?;
    constraint_attrs(out, props)?;
    out.push('>');
    Ok(())
}

fn range(out: &mut String, props: &FieldProps) -> Result<(), RenderError> {
    input(out, "range", props)?;
    if let Some(FieldConfig::Slider(opts)) = &props.config {
        if opts.show_min_max {
            write!(
                out,
                r#"<span class="form-range-min">{}</span><span class="form-range-max">{}</span>"#,
                escape_text(props.min.as_deref().unwrap_or_default()),
                escape_text(props.max.as_deref().unwrap_or_default()),
            )?;
        }
        if opts.show_value {
            out.push_str("<output");
            attr_opt(out, "for", &props.id)?;
            write!(out, ">{}</output>", escape_text(&props.value))?;
        }
    }
    Ok(())
}

fn textarea(out: &mut String, props: &FieldProps) -> Result<(), RenderError> {
    let opts = match &props.config {
        Some(FieldConfig::Textarea(opts)) => Some(opts),
        _ => None,
    };
    let rows = opts.and_then(|o| o.rows).unwrap_or(DEFAULT_TEXTAREA_ROWS);

    out.push_str("<textarea");
    common_attrs(out, props, "form-textarea")?;
    attr(out, "rows", &rows.to_string())?;
    attr_opt(out, "placeholder", &props.placeholder)?;
    if let Some(n) = props.min_length {
        attr(out, "minlength", &n.to_string())?;
    }
    if let Some(n) = props.max_length {
        attr(out, "maxlength", &n.to_string())?;
    }
    if opts.is_some_and(|o| o.auto_resize) {
        attr(out, "data-auto-resize", "true")?;
    }
    write!(out, ">{}</textarea>", escape_text(&props.value))?;
    Ok(())
}

fn select(out: &mut String, props: &FieldProps, multiple: bool) -> Result<(), RenderError> {
    out.push_str("<select");
    common_attrs(out, props, "form-select")?;
    flag(out, "multiple", multiple || props.multiple);
    if let Some(FieldConfig::Select(opts)) = &props.config {
        if opts.searchable {
            attr(out, "data-searchable", "true")?;
        }
        if opts.clearable {
            attr(out, "data-clearable", "true")?;
        }
        if opts.creatable {
            attr(out, "data-creatable", "true")?;
        }
    }
    out.push('>');

    if !multiple && !props.placeholder.is_empty() {
        write!(
            out,
            r#"<option value="">{}</option>"#,
            escape_text(&props.placeholder)
        )?;
    }

    let mut open_group: Option<&str> = None;
    for opt in &props.options {
        if open_group != Some(opt.group.as_str()) {
            if open_group.is_some_and(|g| !g.is_empty()) {
                out.push_str("</optgroup>");
            }
            if !opt.group.is_empty() {
                out.push_str("<optgroup");
                attr(out, "label", &opt.group)?;
                out.push('>');
            }
            open_group = Some(opt.group.as_str());
        }
        select_option(out, props, opt)?;
    }
    if open_group.is_some_and(|g| !g.is_empty()) {
        out.push_str("</optgroup>");
    }
    out.push_str("</select>");
    Ok(())
}

fn select_option(out: &mut String, props: &FieldProps, opt: &SelectOption) -> Result<(), RenderError> {
    out.push_str("<option");
    attr(out, "value", &opt.value)?;
    flag(out, "selected", is_chosen(props, opt));
    flag(out, "disabled", opt.disabled);
    attr_opt(out, "title", &opt.description)?;
    write!(out, ">{}</option>", escape_text(&opt.label))?;
    Ok(())
}

/// Current state wins; the schema's `selected` flag only applies to an empty field.
fn is_chosen(props: &FieldProps, opt: &SelectOption) -> bool {
    if props.value.is_empty() && props.values.is_empty() {
        opt.selected
    } else {
        props.is_selected(&opt.value)
    }
}

fn option_group(out: &mut String, props: &FieldProps, input_type: &str) -> Result<(), RenderError> {
    let (inline, columns) = match &props.config {
        Some(FieldConfig::Group(opts)) => (opts.inline, opts.columns),
        _ => (false, None),
    };
    let role = if input_type == "radio" {
        "radiogroup"
    } else {
        "group"
    };

    out.push_str("<div");
    attr_opt(out, "id", &props.id)?;
    attr(
        out,
        "class",
        &class_list(&["form-options", if inline { "form-options-inline" } else { "" }]),
    )?;
    attr(out, "role", role)?;
    if let Some(columns) = columns {
        attr(out, "data-columns", &columns.to_string())?;
    }
    out.push('>');

    for (index, opt) in props.options.iter().enumerate() {
        out.push_str(r#"<label class="form-option">"#);
        write!(out, r#"<input type="{input_type}""#)?;
        attr_opt(out, "id", &format!("{}-{index}", props.id))?;
        attr(out, "name", &props.name)?;
        attr(out, "value", &opt.value)?;
        attr(
            out,
            "class",
            &class_list(&["form-option-input", props.input_class.as_str()]),
        )?;
        flag(out, "checked", is_chosen(props, opt));
        flag(out, "disabled", props.disabled || opt.disabled);
        flag(out, "required", props.required && input_type == "radio");
        write!(out, ">{}</label>", escape_text(&opt.label))?;
    }
    out.push_str("</div>");
    Ok(())
}

fn checkbox(out: &mut String, props: &FieldProps) -> Result<(), RenderError> {
    out.push_str(r#"<input type="checkbox""#);
    common_attrs(out, props, "form-checkbox")?;
    attr(out, "value", "true")?;
    flag(out, "checked", props.value == "true");
    out.push('>');
    Ok(())
}

fn autocomplete(out: &mut String, props: &FieldProps) -> Result<(), RenderError> {
    let list_id = format!("{}-options", props.id);
    out.push_str(r#"<input type="text""#);
    common_attrs(out, props, "form-input form-autocomplete")?;
    attr_opt(out, "value", &props.value)?;
    attr_opt(out, "placeholder", &props.placeholder)?;
    attr(out, "autocomplete", "off")?;
    attr(out, "list", &list_id)?;
    if let Some(FieldConfig::Autocomplete(opts)) = &props.config {
        attr_opt(out, "data-search-url", &opts.search_url)?;
        if let Some(n) = opts.min_chars {
            attr(out, "data-min-chars", &n.to_string())?;
        }
        if let Some(n) = opts.max_results {
            attr(out, "data-max-results", &n.to_string())?;
        }
        attr(
            out,
            "data-debounce",
            &opts.debounce.unwrap_or(DEFAULT_DEBOUNCE_MS).to_string(),
        )?;
    }
    out.push('>');

    out.push_str("<datalist");
    attr(out, "id", &list_id)?;
    out.push('>');
    for opt in &props.options {
        out.push_str("<option");
        attr(out, "value", &opt.value)?;
        write!(out, ">{}</option>", escape_text(&opt.label))?;
    }
    out.push_str("</datalist>");
    Ok(())
}

fn file(out: &mut String, props: &FieldProps) -> Result<(), RenderError> {
    let opts = match &props.config {
        Some(FieldConfig::File(opts)) => Some(opts),
        _ => None,
    };
    let drop_zone = opts.is_some_and(|o| o.drop_zone);
    if drop_zone {
        out.push_str(r#"<div class="form-dropzone">"#);
    }

    out.push_str(r#"<input type="file""#);
    common_attrs(out, props, "form-file")?;
    if let Some(accept) = &props.accept {
        attr(out, "accept", accept)?;
    }
    flag(
        out,
        "multiple",
        props.multiple || opts.is_some_and(|o| o.multiple),
    );
    if let Some(size) = props.max_file_size {
        attr(out, "data-max-size", &size.to_string())?;
    }
    if let Some(n) = props.max_files {
        attr(out, "data-max-files", &n.to_string())?;
    }
    if opts.is_some_and(|o| o.show_preview) {
        attr(out, "data-preview", "true")?;
    }
    out.push('>');

    if drop_zone {
        out.push_str("</div>");
    }
    Ok(())
}

fn tags(out: &mut String, props: &FieldProps) -> Result<(), RenderError> {
    let joined = if props.values.is_empty() {
        props.value.clone()
    } else {
        props.values.join(",")
    };
    out.push_str(r#"<input type="text""#);
    common_attrs(out, props, "form-input form-tags")?;
    attr_opt(out, "value", &joined)?;
    attr_opt(out, "placeholder", &props.placeholder)?;
    if let Some(FieldConfig::Tags(opts)) = &props.config {
        if let Some(n) = opts.max_tags {
            attr(out, "data-max-tags", &n.to_string())?;
        }
        if opts.editable {
            attr(out, "data-editable", "true")?;
        }
    }
    out.push('>');
    Ok(())
}

fn date_range(out: &mut String, props: &FieldProps) -> Result<(), RenderError> {
    let start = props.values.first().map(String::as_str).unwrap_or_default();
    let end = props.values.get(1).map(String::as_str).unwrap_or_default();

    out.push_str("<div");
    attr_opt(out, "id", &props.id)?;
    attr(out, "class", "form-date-range")?;
    out.push('>');
    for (suffix, value) in [("start", start), ("end", end)] {
        out.push_str(r#"<input type="date""#);
        attr_opt(out, "id", &format!("{}-{suffix}", props.id))?;
        attr(out, "name", &format!("{}[{suffix}]", props.name))?;
        attr(
            out,
            "class",
            &class_list(&["form-input", props.input_class.as_str()]),
        )?;
        attr_opt(out, "value", value)?;
        flag(out, "required", props.required);
        flag(out, "disabled", props.disabled);
        flag(out, "readonly", props.readonly);
        out.push('>');
    }
    out.push_str("</div>");
    Ok(())
}

/// Spinner, state icon, description, help and error text after the control.
fn feedback(out: &mut String, props: &FieldProps) -> Result<(), RenderError> {
    if props.validation_loading {
        out.push_str(r#"<span class="form-spinner" aria-hidden="true"></span>"#);
    }
    if props.validation_state != ValidationState::Idle
        && let Some(icon) = props.tokens.get(TokenKey::ValidationIcon)
    {
        out.push_str(r#"<span class="form-validation-icon""#);
        attr_opt(
            out,
            "title",
            props
                .tokens
                .get(TokenKey::ValidationMessage)
                .unwrap_or_default(),
        )?;
        write!(out, ">{}</span>", escape_text(icon))?;
    }
    if !props.description.is_empty() {
        write!(
            out,
            r#"<p class="form-description">{}</p>"#,
            escape_text(&props.description)
        )?;
    }
    if !props.help_text.is_empty() {
        out.push_str("<p");
        attr_opt(out, "id", &format!("{}-help", props.id))?;
        attr(out, "class", "form-help")?;
        write!(out, ">{}</p>", escape_text(&props.help_text))?;
    }
    if props.has_errors() {
        out.push_str("<p");
        attr_opt(out, "id", &format!("{}-error", props.id))?;
        attr(
            out,
            "class",
            &class_list(&["form-error", props.error_class.as_str()]),
        )?;
        attr(out, "role", "alert")?;
        write!(out, ">{}</p>", escape_text(&props.error_text))?;
    }
    Ok(())
}

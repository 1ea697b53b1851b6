use formview_core::{
    FieldConfig, FieldKind, FieldProps, FieldRenderer, FieldType, FormContext, RenderError,
    SelectOption, TextareaOptions, TokenKey, ValidationState,
};
use formview_html::{HtmlFieldRenderer, TypedFieldRenderer};

fn props(name: &str, kind: FieldKind) -> FieldProps {
    FieldProps {
        kind,
        id: name.replace('_', "-"),
        name: name.to_string(),
        label: "Label".to_string(),
        validate_on_blur: true,
        ..Default::default()
    }
}

fn option(value: &str, label: &str) -> SelectOption {
    SelectOption {
        value: value.to_string(),
        label: label.to_string(),
        ..Default::default()
    }
}

#[test]
fn typed_renderer_supports_every_type() {
    let renderer = TypedFieldRenderer::new(FieldKind::Email);
    assert!(renderer.supports_type(&FieldType::Email));
    assert!(renderer.supports_type(&FieldType::Unknown("x".into())));
    assert_eq!(renderer.kind(), FieldKind::Email);
}

#[test]
fn typed_renderer_uses_bound_kind_over_props_kind() {
    let ctx = FormContext::background();
    let html = TypedFieldRenderer::new(FieldKind::Email)
        .render(&ctx, &props("contact", FieldKind::Text))
        .unwrap();
    assert!(html.contains(r#"<input type="email""#), "{html}");
    assert!(html.contains("form-field-email"));
}

#[test]
fn html_renderer_uses_props_kind() {
    let ctx = FormContext::background();
    let html = HtmlFieldRenderer::new()
        .render(&ctx, &props("age", FieldKind::Number))
        .unwrap();
    assert!(html.contains(r#"<input type="number""#), "{html}");
}

#[test]
fn text_input_carries_value_label_and_constraints() {
    let ctx = FormContext::background();
    let mut p = props("user_name", FieldKind::Text);
    p.value = "Ada <admin>".to_string();
    p.required = true;
    p.min_length = Some(2);
    p.max = Some("10.00".to_string());
    let html = TypedFieldRenderer::new(FieldKind::Text).render(&ctx, &p).unwrap();

    assert!(html.contains(r#"id="user-name""#));
    assert!(html.contains(r#"name="user_name""#));
    assert!(html.contains(r#"value="Ada &lt;admin&gt;""#), "{html}");
    assert!(html.contains(r#"minlength="2""#));
    assert!(html.contains(r#"max="10.00""#));
    assert!(html.contains(" required"));
    assert!(html.contains(r#"<span class="form-required" aria-hidden="true">*</span>"#));
}

#[test]
fn hidden_field_renders_bare_hidden_input() {
    let ctx = FormContext::background();
    let mut p = props("token", FieldKind::Text);
    p.hidden = true;
    p.value = "abc".to_string();
    let html = TypedFieldRenderer::new(FieldKind::Text).render(&ctx, &p).unwrap();
    assert_eq!(
        html,
        r#"<input type="hidden" id="token" name="token" value="abc">"#
    );
}

#[test]
fn errors_render_as_alert_and_mark_input_invalid() {
    let ctx = FormContext::background();
    let mut p = props("email", FieldKind::Email);
    p.errors = vec!["Email is required".to_string()];
    p.error_text = "Email is required".to_string();
    let html = TypedFieldRenderer::new(FieldKind::Email).render(&ctx, &p).unwrap();

    assert!(html.contains(r#"aria-invalid="true""#));
    assert!(html.contains(r#"aria-describedby="email-error""#));
    assert!(html.contains(
        r#"<p id="email-error" class="form-error" role="alert">Email is required</p>"#
    ));
}

#[test]
fn select_marks_current_value_selected() {
    let ctx = FormContext::background();
    let mut p = props("color", FieldKind::Select);
    p.value = "green".to_string();
    p.placeholder = "Pick one".to_string();
    p.options = vec![option("red", "Red"), option("green", "Green")];
    let html = TypedFieldRenderer::new(FieldKind::Select).render(&ctx, &p).unwrap();

    assert!(html.contains(r#"<option value="">Pick one</option>"#));
    assert!(html.contains(r#"<option value="green" selected>Green</option>"#), "{html}");
    assert!(html.contains(r#"<option value="red">Red</option>"#));
}

#[test]
fn multiselect_uses_values_and_groups() {
    let ctx = FormContext::background();
    let mut p = props("langs", FieldKind::MultiSelect);
    p.values = vec!["rs".to_string(), "go".to_string()];
    let mut rs = option("rs", "Rust");
    rs.group = "Systems".to_string();
    let mut go = option("go", "Go");
    go.group = "Systems".to_string();
    p.options = vec![rs, go, option("py", "Python")];
    let html = TypedFieldRenderer::new(FieldKind::MultiSelect)
        .render(&ctx, &p)
        .unwrap();

    assert!(html.contains(" multiple"));
    assert!(html.contains(
        r#"<optgroup label="Systems"><option value="rs" selected>Rust</option><option value="go" selected>Go</option></optgroup><option value="py">Python</option>"#
    ), "{html}");
}

#[test]
fn radio_group_checks_matching_option() {
    let ctx = FormContext::background();
    let mut p = props("size", FieldKind::Radio);
    p.value = "m".to_string();
    p.options = vec![option("s", "Small"), option("m", "Medium")];
    let html = TypedFieldRenderer::new(FieldKind::Radio).render(&ctx, &p).unwrap();

    assert!(html.contains(r#"role="radiogroup""#));
    assert!(html.contains(r#"<input type="radio" id="size-1" name="size" value="m" class="form-option-input" checked>Medium</label>"#), "{html}");
}

#[test]
fn checkbox_renders_input_before_label() {
    let ctx = FormContext::background();
    let mut p = props("agree", FieldKind::Checkbox);
    p.value = "true".to_string();
    let html = TypedFieldRenderer::new(FieldKind::Checkbox).render(&ctx, &p).unwrap();

    let input = html.find(r#"<input type="checkbox""#).unwrap();
    let label = html.find("<label").unwrap();
    assert!(input < label);
    assert!(html.contains(" checked"));
}

#[test]
fn textarea_uses_configured_rows() {
    let ctx = FormContext::background();
    let mut p = props("bio", FieldKind::Textarea);
    p.value = "line & more".to_string();
    p.config = Some(FieldConfig::Textarea(TextareaOptions {
        rows: Some(6),
        auto_resize: true,
        resizable: false,
    }));
    let html = TypedFieldRenderer::new(FieldKind::Textarea).render(&ctx, &p).unwrap();
    assert!(html.contains(r#"rows="6""#));
    assert!(html.contains(r#"data-auto-resize="true""#));
    assert!(html.contains(">line &amp; more</textarea>"));
}

#[test]
fn validation_endpoint_adds_htmx_attributes() {
    let ctx = FormContext::background();
    let mut p = props("username", FieldKind::Text);
    p.on_validate = Some("/api/validate/field/username".to_string());
    p.validation_debounce_ms = Some(500);
    p.validate_on_input = true;
    let html = TypedFieldRenderer::new(FieldKind::Text).render(&ctx, &p).unwrap();

    assert!(html.contains(r#"hx-post="/api/validate/field/username""#));
    assert!(html.contains(r#"hx-trigger="blur, input changed delay:500ms""#), "{html}");
}

#[test]
fn password_value_is_not_echoed() {
    let ctx = FormContext::background();
    let mut p = props("secret", FieldKind::Password);
    p.value = "hunter2".to_string();
    let html = TypedFieldRenderer::new(FieldKind::Password).render(&ctx, &p).unwrap();
    assert!(!html.contains("hunter2"));
}

#[test]
fn tokens_and_state_icon_are_rendered() {
    let ctx = FormContext::background().with_dark_mode(true);
    let mut p = props("email", FieldKind::Email);
    p.validation_state = ValidationState::Valid;
    p.tokens.set(TokenKey::FieldBorder, "#22c55e");
    p.tokens.set(TokenKey::ValidationIcon, "✓");
    p.tokens.set(TokenKey::ValidationMessage, "Valid");
    let html = TypedFieldRenderer::new(FieldKind::Email).render(&ctx, &p).unwrap();

    assert!(html.contains(r#"style="--field-border:#22c55e;""#), "{html}");
    assert!(html.contains(r#"data-theme="dark""#));
    assert!(html.contains(r#"<span class="form-validation-icon" title="Valid">✓</span>"#));
}

#[test]
fn missing_name_is_an_error() {
    let ctx = FormContext::background();
    let p = props("", FieldKind::Text);
    let err = TypedFieldRenderer::new(FieldKind::Text)
        .render(&ctx, &p)
        .unwrap_err();
    assert!(matches!(err, RenderError::Unsupported { .. }));
}

#[test]
fn date_range_renders_two_inputs() {
    let ctx = FormContext::background();
    let mut p = props("stay", FieldKind::DateRange);
    p.values = vec!["2024-01-01".to_string(), "2024-01-05".to_string()];
    let html = TypedFieldRenderer::new(FieldKind::DateRange)
        .render(&ctx, &p)
        .unwrap();
    assert!(html.contains(r#"name="stay[start]""#));
    assert!(html.contains(r#"value="2024-01-05""#));
}

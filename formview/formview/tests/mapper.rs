
use formview::{
    FieldMapper, KindMapping, MapperError, RenderConfig, field_id, map_field_type,
    core::{
        Action, ActionType, ButtonType, ClientRuleKind, Field, FieldConfig, FieldKind,
        FieldOption, FieldType, FieldValidation, FormContext, LocalizedText, SelectOptions,
        TextareaOptions, ValidationMessages, Value, ValueFormat,
    },
};
use test_helpers::{ctx, localized_email, name_field, qty};

fn convert(mapper: &FieldMapper, field: &Field, value: Option<&Value>) -> formview::core::FieldProps {
    mapper
        .convert(&ctx(), Some(field), value, &[], false, false)
        .unwrap()
}

#[test]
fn label_follows_configured_locale_with_default_fallback() {
    let field = localized_email();

    let fr = FieldMapper::new().with_locale("fr");
    assert_eq!(convert(&fr, &field, None).label, "Courriel");

    let de = FieldMapper::new().with_locale("de");
    assert_eq!(convert(&de, &field, None).label, "Email");

    let en = FieldMapper::new();
    assert_eq!(convert(&en, &field, None).label, "Email");
}

#[test]
fn context_locale_overrides_configured_locale() {
    let field = localized_email();
    let ctx = FormContext::background().with_locale("fr");
    let props = FieldMapper::new()
        .convert(&ctx, Some(&field), None, &[], false, false)
        .unwrap();
    assert_eq!(props.label, "Courriel");
    assert_eq!(props.locale, "fr");
}

#[test]
fn localize_uses_mapper_locale() {
    let field = localized_email();
    let mapper = FieldMapper::new().with_locale("fr");
    assert_eq!(
        mapper.localize(&field, "Email", LocalizedText::Label),
        "Courriel"
    );
    assert_eq!(
        mapper.localize(&field, "Your address", LocalizedText::Placeholder),
        "Your address"
    );
}

#[test]
fn nil_field_and_action_are_rejected() {
    let mapper = FieldMapper::new();
    assert_eq!(
        mapper
            .convert(&ctx(), None, None, &[], false, false)
            .unwrap_err(),
        MapperError::NilField
    );
    assert_eq!(
        mapper.convert_action(None, true).unwrap_err(),
        MapperError::NilAction
    );
}

#[test]
fn props_carry_identity_state_and_errors() {
    let field = Field::builder("First Name", FieldType::Text)
        .label("First name")
        .placeholder("Ada")
        .required()
        .build();
    let errors = vec!["too short".to_string(), "bad chars".to_string()];
    let props = FieldMapper::new()
        .convert(
            &ctx(),
            Some(&field),
            Some(&Value::from("A")),
            &errors,
            true,
            true,
        )
        .unwrap();

    assert_eq!(props.id, "first-name");
    assert_eq!(props.name, "First Name");
    assert_eq!(props.kind, FieldKind::Text);
    assert_eq!(props.value, "A");
    assert_eq!(props.error_text, "too short; bad chars");
    assert!(props.required && props.touched && props.dirty);
    assert!(props.validate_on_blur);
    assert!(!props.validate_on_input);
    assert_eq!(props.theme_id, "default");
}

#[test]
fn numeric_rules_are_formatted_with_two_decimals() {
    let field = Field::builder("qty", FieldType::Number)
        .validation(FieldValidation::new().min(1.0).max(9.5).step(0.5))
        .build();
    let props = convert(&FieldMapper::new(), &field, Some(&Value::Int(3)));
    assert_eq!(props.min.as_deref(), Some("1.00"));
    assert_eq!(props.max.as_deref(), Some("9.50"));
    assert_eq!(props.step.as_deref(), Some("0.50"));
    assert_eq!(props.value, "3");
}

#[test]
fn unknown_type_falls_back_to_text_explicitly() {
    let custom = FieldType::Unknown("sketch".into());
    assert_eq!(map_field_type(&custom), KindMapping::Fallback);
    assert!(map_field_type(&FieldType::Rating).is_fallback());
    assert_eq!(
        map_field_type(&FieldType::Phone),
        KindMapping::Direct(FieldKind::Tel)
    );
    assert_eq!(
        map_field_type(&FieldType::Checkboxes).kind(),
        FieldKind::CheckboxGroup
    );

    let field = Field::new("sig", custom);
    assert_eq!(convert(&FieldMapper::new(), &field, None).kind, FieldKind::Text);
}

#[test]
fn hidden_type_and_flag_both_hide() {
    let mapper = FieldMapper::new();
    let by_type = Field::new("token", FieldType::Hidden);
    assert!(convert(&mapper, &by_type, None).hidden);

    let by_flag = Field::builder("note", FieldType::Text).hidden().build();
    assert!(convert(&mapper, &by_flag, None).hidden);
}

#[test]
fn multi_select_values_come_from_value_or_selected_options() {
    let field = Field::builder("tags", FieldType::MultiSelect)
        .options([
            FieldOption::new("a", "A").selected(),
            FieldOption::new("b", "B"),
            FieldOption::new("c", "C").selected(),
        ])
        .build();
    let mapper = FieldMapper::new();

    let props = convert(&mapper, &field, None);
    assert!(props.multiple);
    assert_eq!(props.values, vec!["a", "c"]);

    let chosen = Value::string_list(["b"]);
    let props = convert(&mapper, &field, Some(&chosen));
    assert_eq!(props.values, vec!["b"]);
    assert!(props.is_selected("b"));
    assert_eq!(props.options.len(), 3);
}

#[test]
fn field_config_is_only_copied_when_it_applies() {
    let rows = FieldConfig::Textarea(TextareaOptions {
        rows: Some(6),
        ..Default::default()
    });
    let mapper = FieldMapper::new();

    let textarea = Field::builder("bio", FieldType::Textarea)
        .config(rows.clone())
        .build();
    assert_eq!(convert(&mapper, &textarea, None).config, Some(rows.clone()));

    let text = Field::builder("bio", FieldType::Text).config(rows).build();
    assert_eq!(convert(&mapper, &text, None).config, None);

    let select = Field::builder("color", FieldType::Select)
        .config(FieldConfig::Select(SelectOptions::default()))
        .build();
    assert!(convert(&mapper, &select, None).config.is_some());
}

#[test]
fn custom_rule_and_min_items_become_validation_rules() {
    let field = Field::builder("picks", FieldType::MultiSelect)
        .validation(FieldValidation::new().min_items(2).custom("picks.len() < 5"))
        .build();
    let props = convert(&FieldMapper::new(), &field, None);

    let kinds: Vec<&str> = props
        .validation_rules
        .iter()
        .map(|r| r.rule_type.as_str())
        .collect();
    assert_eq!(kinds, vec!["minItems", "custom"]);
    assert_eq!(props.validation_rules[0].message, "Select at least 2 items");
}

#[test]
fn client_rules_cover_bounds_formats_and_async_checks() {
    let mapper = FieldMapper::new();

    let rules = mapper.extract_client_validation_rules(&name_field());
    assert_eq!(rules.min_length, Some(2));
    assert_eq!(rules.max_length, Some(40));
    assert!(!rules.has_async());

    let email = Field::builder("email", FieldType::Email)
        .validation(FieldValidation::new().unique())
        .build();
    let rules = mapper.extract_client_validation_rules(&email);
    let kinds: Vec<ClientRuleKind> = rules.custom_rules.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![ClientRuleKind::EmailFormat, ClientRuleKind::Uniqueness]
    );
    assert!(rules.has_async());

    let bounded = mapper.extract_client_validation_rules(&qty());
    assert_eq!(bounded.min, Some(0.0));
    assert_eq!(bounded.max, Some(100.0));
}

#[test]
fn server_only_formats_are_not_sent_to_the_client() {
    let mapper = FieldMapper::new();
    let uuid = Field::builder("id", FieldType::Text)
        .validation(FieldValidation::new().format(ValueFormat::Uuid))
        .build();
    assert_eq!(mapper.extract_client_validation_rules(&uuid).format, None);

    let date = Field::builder("on", FieldType::Text)
        .validation(FieldValidation::new().format(ValueFormat::Date))
        .build();
    assert_eq!(
        mapper.extract_client_validation_rules(&date).format.as_deref(),
        Some("date")
    );
}

#[test]
fn custom_rule_message_honours_overrides() {
    let mapper = FieldMapper::new();
    let plain = Field::builder("code", FieldType::Text)
        .validation(FieldValidation::new().custom("check(code)"))
        .build();
    let rules = mapper.extract_client_validation_rules(&plain);
    assert_eq!(rules.custom_rules[0].kind, ClientRuleKind::AsyncCustom);
    assert_eq!(rules.custom_rules[0].message, "Validation failed");

    let messages = ValidationMessages {
        custom: Some("Code is not recognised".to_string()),
        ..Default::default()
    };
    let overridden = Field::builder("code", FieldType::Text)
        .validation(FieldValidation::new().custom("check(code)").messages(messages))
        .build();
    let rules = mapper.extract_client_validation_rules(&overridden);
    assert_eq!(rules.custom_rules[0].message, "Code is not recognised");
}

#[test]
fn plain_optional_field_has_no_client_rules() {
    let mapper = FieldMapper::new();
    let field = Field::new("note", FieldType::Textarea);
    assert!(!mapper.has_client_validation_rules(&field));
    assert!(mapper.has_client_validation_rules(&name_field()));
}

#[test]
fn client_validation_config_document() {
    let config = RenderConfig {
        debounce_ms: 450,
        ..Default::default()
    };
    let mapper = FieldMapper::from_config(config);
    let doc = mapper.client_validation_config(&name_field());

    assert_eq!(doc["fieldName"], "name");
    assert_eq!(doc["required"], false);
    assert_eq!(doc["debounceMs"], 450);
    assert_eq!(doc["rules"]["minLength"], 2);
}

#[test]
fn actions_map_to_buttons() {
    let mapper = FieldMapper::new();

    let mut submit = Action::new("save", ActionType::Submit, "Save");
    submit.variant = "primary".to_string();
    submit.size = "lg".to_string();
    let props = mapper.convert_action(Some(&submit), true).unwrap();
    assert_eq!(props.button_type, ButtonType::Submit);
    assert_eq!(props.variant, "primary");
    assert_eq!(props.class, "btn-lg");
    assert!(props.enabled);

    let mut link = Action::new("help", ActionType::Link, "Help");
    link.loading = true;
    let props = mapper.convert_action(Some(&link), true).unwrap();
    assert_eq!(props.button_type, ButtonType::Button);
    assert_eq!(props.variant, "default");
    assert_eq!(props.class, "btn-md btn-loading");

    let mut disabled = Action::new("reset", ActionType::Reset, "Reset");
    disabled.disabled = true;
    assert!(!mapper.convert_action(Some(&disabled), true).unwrap().enabled);
    assert!(
        !mapper
            .convert_action(Some(&Action::new("x", ActionType::Button, "X")), false)
            .unwrap()
            .enabled
    );
}

#[test]
fn field_ids_are_dom_friendly() {
    assert_eq!(field_id("user_name"), "user-name");
    assert_eq!(field_id("Billing Address"), "billing-address");
}

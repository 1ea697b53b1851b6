use formview::{
    RenderConfig, validation_tokens,
    core::{TokenKey, ValidationState},
};

#[test]
fn partial_config_keeps_defaults() {
    let config: RenderConfig =
        serde_json::from_str(r#"{"locale": "fr", "debounce_ms": 500}"#).unwrap();
    assert_eq!(config.locale, "fr");
    assert_eq!(config.debounce_ms, 500);
    assert_eq!(config.default_locale, "en");
    assert_eq!(config.validation_endpoint, "/api/validate");
    assert!(config.validate_on_blur);
    assert!(!config.validate_on_input);
}

#[test]
fn field_validation_url_joins_endpoint() {
    let config = RenderConfig::default();
    assert_eq!(
        config.field_validation_url("email"),
        "/api/validate/field/email"
    );

    let config = RenderConfig::default().with_validation_endpoint("https://x.test/v/");
    assert_eq!(
        config.field_validation_url("qty"),
        "https://x.test/v/field/qty"
    );
}

#[test]
fn idle_tokens_have_no_feedback() {
    let tokens = validation_tokens(ValidationState::Idle, false);
    assert_eq!(tokens.get(TokenKey::FieldBorder), Some("#e5e7eb"));
    assert_eq!(tokens.get(TokenKey::ValidationIcon), None);
    assert_eq!(tokens.get(TokenKey::ValidationColor), None);
}

#[test]
fn feedback_tokens_follow_state_and_theme() {
    let light = validation_tokens(ValidationState::Invalid, false);
    assert_eq!(light.get(TokenKey::ValidationColor), Some("#dc2626"));
    assert_eq!(light.get(TokenKey::FieldBorder), Some("#dc2626"));
    assert_eq!(light.get(TokenKey::ValidationMessage), Some("Invalid"));

    let dark = validation_tokens(ValidationState::Valid, true);
    assert_eq!(dark.get(TokenKey::FieldBackground), Some("#111827"));
    assert_eq!(dark.get(TokenKey::ValidationColor), Some("#22c55e"));
    assert_eq!(dark.get(TokenKey::ValidationIcon), Some("✓"));
}

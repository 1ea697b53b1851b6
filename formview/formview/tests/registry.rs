
use std::sync::Arc;

use formview::{
    ComponentConfig, ComponentRegistry, DEFAULT_PRIORITY, FALLBACK_PRIORITY, RegistryError,
    core::{Field, FieldType},
};
use test_helpers::{FailingRenderer, UnknownOnlyRenderer, ctx, tag};

fn render_with(registry: &ComponentRegistry, field: &Field) -> String {
    let props = formview::FieldMapper::new()
        .convert(&ctx(), Some(field), None, &[], false, false)
        .unwrap();
    registry
        .resolve(field)
        .unwrap()
        .render(&ctx(), &props)
        .unwrap()
}

#[test]
fn lower_priority_registration_is_rejected_and_binding_kept() {
    let registry = ComponentRegistry::new();
    registry
        .register_with_config(
            FieldType::Select,
            ComponentConfig::new(tag("a")).with_priority(100),
        )
        .unwrap();

    let err = registry
        .register_with_config(
            FieldType::Select,
            ComponentConfig::new(tag("b")).with_priority(50),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::LowerPriority {
            existing: 100,
            attempted: 50,
            ..
        }
    ));

    let field = Field::new("color", FieldType::Select);
    assert!(render_with(&registry, &field).starts_with("<a "));
}

#[test]
fn equal_priority_is_rejected_and_higher_replaces() {
    let registry = ComponentRegistry::new();
    registry.register(FieldType::Text, tag("a")).unwrap();
    assert!(registry.register(FieldType::Text, tag("b")).is_err());

    registry
        .register_with_config(
            FieldType::Text,
            ComponentConfig::new(tag("c")).with_priority(DEFAULT_PRIORITY + 1),
        )
        .unwrap();
    assert_eq!(
        registry.priority_of(&FieldType::Text),
        Some(DEFAULT_PRIORITY + 1)
    );
    let field = Field::new("title", FieldType::Text);
    assert!(render_with(&registry, &field).starts_with("<c "));

    assert!(
        registry
            .register_with_config(
                FieldType::Text,
                ComponentConfig::new(tag("d")).with_priority(DEFAULT_PRIORITY + 1),
            )
            .is_err()
    );
}

#[test]
fn resolve_without_binding_or_fallback_fails() {
    let registry = ComponentRegistry::new();
    let err = registry
        .resolve(&Field::new("when", FieldType::Date))
        .err()
        .unwrap();
    assert!(matches!(
        err,
        RegistryError::NoRenderer {
            field_type: FieldType::Date
        }
    ));
}

#[test]
fn fallbacks_are_consulted_in_order_by_support() {
    let registry = ComponentRegistry::new();
    registry.register_fallback(ComponentConfig::new(Arc::new(UnknownOnlyRenderer)));
    registry.register_fallback(ComponentConfig::new(tag("any")).with_fallback(true));

    let custom = Field::new("sig", FieldType::Unknown("sketch".into()));
    assert_eq!(render_with(&registry, &custom), r#"<unknown name="sig">"#);

    let date = Field::new("when", FieldType::Date);
    assert!(render_with(&registry, &date).starts_with("<any "));
    assert_eq!(registry.fallback_info().len(), 2);
}

#[test]
fn fallback_flagged_binding_also_joins_the_chain() {
    let registry = ComponentRegistry::new();
    registry
        .register_with_config(
            FieldType::Text,
            ComponentConfig::new(tag("t")).with_fallback(true),
        )
        .unwrap();

    let field = Field::new("when", FieldType::Date);
    assert!(render_with(&registry, &field).starts_with("<t "));
    assert_eq!(registry.supported_types(), vec![FieldType::Text]);
}

#[test]
fn direct_binding_wins_over_fallback() {
    let registry = ComponentRegistry::new();
    registry.register_fallback(ComponentConfig::new(tag("fallback")));
    registry.register(FieldType::Email, tag("email")).unwrap();

    let field = Field::new("email", FieldType::Email);
    assert!(render_with(&registry, &field).starts_with("<email "));
}

#[test]
fn resolution_is_repeatable() {
    let registry = ComponentRegistry::with_defaults();
    let field = Field::builder("email", FieldType::Email)
        .label("Email")
        .build();
    assert_eq!(render_with(&registry, &field), render_with(&registry, &field));
}

#[test]
fn defaults_cover_mapped_types_and_unknown_tags() {
    let registry = ComponentRegistry::with_defaults();
    assert!(registry.defaults_registered());

    for field_type in [
        FieldType::Text,
        FieldType::Email,
        FieldType::Date,
        FieldType::Select,
        FieldType::Textarea,
        FieldType::Tags,
    ] {
        assert_eq!(
            registry.priority_of(&field_type),
            Some(DEFAULT_PRIORITY),
            "{field_type}"
        );
    }

    let info = registry.renderer_info();
    assert_eq!(info[&FieldType::Email], "Basic input for email");
    assert_eq!(info[&FieldType::Date], "Date/time input for date");

    let custom = Field::new("sig", FieldType::Unknown("sketch".into()));
    let html = render_with(&registry, &custom);
    assert!(html.contains(r#"<input type="text""#), "{html}");
}

#[test]
fn register_defaults_is_idempotent() {
    let registry = ComponentRegistry::with_defaults();
    let types = registry.supported_types();
    registry.register_defaults();
    registry.register_defaults();

    assert_eq!(registry.supported_types(), types);
    assert_eq!(registry.fallback_info().len(), 1);
}

#[test]
fn defaults_do_not_override_caller_bindings() {
    let registry = ComponentRegistry::new();
    registry.register(FieldType::Email, tag("mine")).unwrap();
    registry.register_defaults();

    let field = Field::new("email", FieldType::Email);
    assert!(render_with(&registry, &field).starts_with("<mine "));
    assert_eq!(
        registry.renderer_info()[&FieldType::Email],
        "Renderer for email fields"
    );
}

#[test]
fn defaults_replace_only_weaker_caller_bindings() {
    let registry = ComponentRegistry::new();
    registry
        .register_with_config(
            FieldType::Text,
            ComponentConfig::new(tag("weak")).with_priority(DEFAULT_PRIORITY - 50),
        )
        .unwrap();
    registry
        .register_with_config(
            FieldType::Number,
            ComponentConfig::new(tag("strong")).with_priority(DEFAULT_PRIORITY + 100),
        )
        .unwrap();
    registry.register_defaults();

    assert_eq!(registry.priority_of(&FieldType::Text), Some(DEFAULT_PRIORITY));
    assert!(!render_with(&registry, &Field::new("title", FieldType::Text)).starts_with("<weak "));
    assert_eq!(
        registry.priority_of(&FieldType::Number),
        Some(DEFAULT_PRIORITY + 100)
    );
    assert!(render_with(&registry, &Field::new("qty", FieldType::Number)).starts_with("<strong "));
    assert_eq!(registry.fallback_info().len(), 1);
}

#[test]
fn builder_applies_bindings_then_defaults() {
    let registry = ComponentRegistry::builder()
        .with_renderer(FieldType::Text, tag("custom"))
        .with_config(
            FieldType::Unknown("sketch".into()),
            ComponentConfig::new(Arc::new(FailingRenderer)).with_description("signature pad"),
        )
        .with_defaults()
        .build()
        .unwrap();

    let text = Field::new("title", FieldType::Text);
    assert!(render_with(&registry, &text).starts_with("<custom "));
    assert_eq!(
        registry.renderer_info()[&FieldType::Unknown("sketch".into())],
        "signature pad"
    );
    assert_eq!(
        registry.fallback_info(),
        vec!["Fallback text renderer for unsupported field types".to_string()]
    );
}

#[test]
fn builder_fails_on_conflicting_bindings() {
    let result = ComponentRegistry::builder()
        .with_config(
            FieldType::Text,
            ComponentConfig::new(tag("a")).with_priority(10),
        )
        .with_config(
            FieldType::Text,
            ComponentConfig::new(tag("b")).with_priority(5),
        )
        .build();
    assert!(matches!(result, Err(RegistryError::LowerPriority { .. })));
}

#[test]
fn fallback_priority_is_below_default() {
    assert!(FALLBACK_PRIORITY < DEFAULT_PRIORITY);
}

#[test]
fn concurrent_registration_and_resolution() {
    let registry = ComponentRegistry::with_defaults();
    std::thread::scope(|s| {
        for i in 0..8 {
            let registry = &registry;
            s.spawn(move || {
                let field_type = FieldType::Unknown(format!("custom{i}"));
                registry.register(field_type.clone(), tag("c")).unwrap();
                for _ in 0..50 {
                    registry
                        .resolve(&Field::new("f", FieldType::Text))
                        .unwrap();
                    registry.resolve_type(&field_type).unwrap();
                }
            });
        }
    });
    assert_eq!(registry.supported_types().len(), 22 + 8);
}

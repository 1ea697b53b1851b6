use formview_core::Value;

#[test]
fn value_deserializes_from_plain_json() {
    let values: Vec<Value> = serde_json::from_str(r#"[null, true, 5, 2.5, "x", ["a", "b"]]"#).unwrap();
    assert_eq!(
        values,
        vec![
            Value::Null,
            Value::Bool(true),
            Value::Int(5),
            Value::Float(2.5),
            Value::string("x"),
            Value::string_list(["a", "b"]),
        ]
    );
}

#[test]
fn value_is_empty_covers_null_empty_string_and_empty_list() {
    assert!(Value::Null.is_empty());
    assert!(Value::string("").is_empty());
    assert!(Value::List(vec![]).is_empty());
    assert!(!Value::Bool(false).is_empty());
    assert!(!Value::Int(0).is_empty());
    assert!(!Value::string(" ").is_empty());
}

#[test]
fn value_display_joins_lists_and_renders_null_as_empty() {
    assert_eq!(Value::Null.to_string(), "");
    assert_eq!(Value::Int(7).to_string(), "7");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::string_list(["a", "b", "c"]).to_string(), "a,b,c");
}

#[test]
fn try_f64_accepts_numeric_strings() {
    assert_eq!(Value::string("12.5").try_f64().unwrap(), Some(12.5));
    assert_eq!(Value::Int(3).try_f64().unwrap(), Some(3.0));
    assert_eq!(Value::Null.try_f64().unwrap(), None);
    assert!(Value::string("abc").try_f64().is_err());
}

#[test]
fn typed_accessors_report_mismatch() {
    let err = Value::Int(1).try_str().unwrap_err();
    assert_eq!(err.expected, "String");
    assert_eq!(err.actual, "Int");
    assert!(Value::string("x").try_bool().is_err());
    assert_eq!(Value::Bool(true).try_bool().unwrap(), Some(true));
    assert_eq!(Value::Int(4).try_i64().unwrap(), Some(4));
}

#[test]
fn as_string_list_requires_all_string_items() {
    assert_eq!(
        Value::string_list(["x", "y"]).as_string_list(),
        Some(vec!["x", "y"])
    );
    assert_eq!(
        Value::List(vec![Value::string("x"), Value::Int(1)]).as_string_list(),
        None
    );
    assert_eq!(Value::string("x").as_string_list(), None);
}

#[test]
fn from_impls_build_expected_variants() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(5_i32), Value::Int(5));
    assert_eq!(Value::from(1.5), Value::Float(1.5));
    assert_eq!(Value::from("a"), Value::string("a"));
    assert_eq!(
        Value::from(vec!["a".to_string()]),
        Value::string_list(["a"])
    );
}

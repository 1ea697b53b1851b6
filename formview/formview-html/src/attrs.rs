//! Attribute writing helpers. Every value goes through [`escape_attr`].

use std::fmt::{self, Write};

use formview_core::escape_attr;

pub(crate) fn attr(out: &mut String, name: &str, value: &str) -> fmt::Result {
    write!(out, r#" {name}="{}""#, escape_attr(value))
}

/// Write `name="value"` unless `value` is empty.
pub(crate) fn attr_opt(out: &mut String, name: &str, value: &str) -> fmt::Result {
    if value.is_empty() {
        return Ok(());
    }
    attr(out, name, value)
}

/// Write a bare boolean attribute such as `required`.
pub(crate) fn flag(out: &mut String, name: &str, on: bool) {
    if on {
        out.push(' ');
        out.push_str(name);
    }
}

/// Join the non-empty class names with single spaces.
pub(crate) fn class_list(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

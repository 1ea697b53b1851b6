//! Synchronous, in-memory checks of a single field value.
//!
//! Only cheap local checks live here. Uniqueness and custom expressions need
//! a server round-trip and are surfaced as async client rules instead.

use std::{
    collections::{HashMap, HashSet},
    sync::{LazyLock, PoisonError, RwLock},
};

use chrono::{DateTime, NaiveDate, NaiveTime};
use regex::Regex;

use super::{
    field::Field,
    rules::{FieldValidation, ValidationMessages, ValueFormat},
};
use crate::{
    context::FormContext,
    error::{FieldValidationError, ValidationCode},
    field_type::FieldType,
    value::Value,
};

/// Compiled `pattern` rules, shared by every field using the same pattern.
static PATTERNS: LazyLock<RwLock<HashMap<String, Regex>>> = LazyLock::new(Default::default);

fn compiled_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    if let Some(re) = PATTERNS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(pattern)
    {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    PATTERNS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(pattern.to_string(), re.clone());
    Ok(re)
}

impl Field {
    /// Validate `value` against this field's rules.
    ///
    /// Returns the first failed check. Empty values only fail the required
    /// check; an unticked checkbox or switch counts as empty. Email, URL and
    /// phone fields are format-checked even without explicit rules.
    pub fn validate_value(
        &self,
        ctx: &FormContext,
        value: &Value,
    ) -> Result<(), FieldValidationError> {
        FieldValueValidator { field: self }.validate(ctx, value)
    }
}

struct FieldValueValidator<'a> {
    field: &'a Field,
}

impl FieldValueValidator<'_> {
    fn validate(&self, ctx: &FormContext, value: &Value) -> Result<(), FieldValidationError> {
        if ctx.is_cancelled() {
            return Err(self.error(
                ValidationCode::Cancelled,
                format!("validation of {} was cancelled", self.label()),
            ));
        }

        if self.is_missing(value) {
            if self.field.required {
                let message = self
                    .override_message(|m| &m.required)
                    .unwrap_or_else(|| format!("{} is required", self.label()));
                return Err(self.error(ValidationCode::Required, message));
            }
            return Ok(());
        }

        let rules = self.field.validation.as_ref();

        if self.field.field_type.is_numeric() {
            return match rules {
                Some(rules) => self.validate_number(rules, value),
                None => self.number(value).map(|_| ()),
            };
        }

        match value {
            Value::List(items) => match rules {
                Some(rules) => self.validate_list(rules, items),
                None => Ok(()),
            },
            Value::String(s) => {
                if let Some(rules) = rules {
                    self.validate_string(rules, s)?;
                }
                self.validate_intrinsic_format(rules, s)
            }
            _ => Ok(()),
        }
    }

    fn validate_string(&self, rules: &FieldValidation, s: &str) -> Result<(), FieldValidationError> {
        let len = s.chars().count();

        if let Some(min) = rules.min_length
            && len < min
        {
            let message = self.override_message(|m| &m.min_length).unwrap_or_else(|| {
                format!("{} must be at least {min} characters", self.label())
            });
            return Err(self.error(ValidationCode::MinLength, message));
        }

        if let Some(max) = rules.max_length
            && len > max
        {
            let message = self.override_message(|m| &m.max_length).unwrap_or_else(|| {
                format!("{} must be at most {max} characters", self.label())
            });
            return Err(self.error(ValidationCode::MaxLength, message));
        }

        if let Some(pattern) = rules.pattern.as_deref().filter(|p| !p.is_empty()) {
            let re = compiled_pattern(pattern).map_err(|_| {
                self.error(
                    ValidationCode::InvalidPattern,
                    format!("{} has an invalid validation pattern", self.label()),
                )
            })?;
            if !re.is_match(s) {
                let message = self
                    .override_message(|m| &m.pattern)
                    .unwrap_or_else(|| format!("{} format is invalid", self.label()));
                return Err(self.error(ValidationCode::Pattern, message));
            }
        }

        if let Some(format) = &rules.format {
            self.check_format(format, s)?;
        }
        Ok(())
    }

    /// Format implied by the field type, skipped when the explicit rule
    /// already checked the same format.
    fn validate_intrinsic_format(
        &self,
        rules: Option<&FieldValidation>,
        s: &str,
    ) -> Result<(), FieldValidationError> {
        let intrinsic = match self.field.field_type {
            FieldType::Email => ValueFormat::Email,
            FieldType::Url => ValueFormat::Url,
            FieldType::Phone => ValueFormat::Phone,
            _ => return Ok(()),
        };
        if rules.and_then(|r| r.format.as_ref()) == Some(&intrinsic) {
            return Ok(());
        }
        self.check_format(&intrinsic, s)
    }

    fn check_format(&self, format: &ValueFormat, s: &str) -> Result<(), FieldValidationError> {
        let (ok, what) = match format {
            ValueFormat::Email => (is_email(s), "a valid email address"),
            ValueFormat::Url => (is_http_url(s), "a valid URL"),
            ValueFormat::Uuid => (uuid::Uuid::parse_str(s).is_ok(), "a valid UUID"),
            ValueFormat::Date => (
                NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
                "a valid date (YYYY-MM-DD)",
            ),
            ValueFormat::DateTime => (
                DateTime::parse_from_rfc3339(s).is_ok(),
                "a valid date and time",
            ),
            ValueFormat::Time => (
                NaiveTime::parse_from_str(s, "%H:%M:%S").is_ok()
                    || NaiveTime::parse_from_str(s, "%H:%M").is_ok(),
                "a valid time (HH:MM:SS)",
            ),
            ValueFormat::Phone => (is_phone(s), "a valid phone number"),
            ValueFormat::Color => (is_hex_color(s), "a valid color"),
            ValueFormat::Other(_) => (true, ""),
        };
        if ok {
            Ok(())
        } else {
            Err(self.error(
                ValidationCode::Format,
                format!("{} must be {what}", self.label()),
            ))
        }
    }

    fn number(&self, value: &Value) -> Result<f64, FieldValidationError> {
        match value.try_f64() {
            Ok(Some(n)) => Ok(n),
            _ => Err(self.error(
                ValidationCode::InvalidType,
                format!("{} must be a number", self.label()),
            )),
        }
    }

    fn validate_number(
        &self,
        rules: &FieldValidation,
        value: &Value,
    ) -> Result<(), FieldValidationError> {
        let num = self.number(value)?;

        if let Some(min) = rules.min {
            let (failed, bound) = if rules.exclusive_min {
                (num <= min, "greater than")
            } else {
                (num < min, "at least")
            };
            if failed {
                let message = self
                    .override_message(|m| &m.min)
                    .unwrap_or_else(|| format!("{} must be {bound} {min}", self.label()));
                return Err(self.error(ValidationCode::MinValue, message));
            }
        }

        if let Some(max) = rules.max {
            let (failed, bound) = if rules.exclusive_max {
                (num >= max, "less than")
            } else {
                (num > max, "at most")
            };
            if failed {
                let message = self
                    .override_message(|m| &m.max)
                    .unwrap_or_else(|| format!("{} must be {bound} {max}", self.label()));
                return Err(self.error(ValidationCode::MaxValue, message));
            }
        }

        if rules.integer && num.fract() != 0.0 {
            return Err(self.error(
                ValidationCode::NotInteger,
                format!("{} must be an integer", self.label()),
            ));
        }
        if rules.positive && num <= 0.0 {
            return Err(self.error(
                ValidationCode::NotPositive,
                format!("{} must be positive", self.label()),
            ));
        }
        if rules.negative && num >= 0.0 {
            return Err(self.error(
                ValidationCode::NotNegative,
                format!("{} must be negative", self.label()),
            ));
        }
        if let Some(m) = rules.multiple_of.filter(|m| *m > 0.0) {
            let ratio = num / m;
            if (ratio - ratio.round()).abs() > 1e-9 {
                return Err(self.error(
                    ValidationCode::MultipleOf,
                    format!("{} must be a multiple of {m}", self.label()),
                ));
            }
        }
        Ok(())
    }

    fn validate_list(
        &self,
        rules: &FieldValidation,
        items: &[Value],
    ) -> Result<(), FieldValidationError> {
        if let Some(min) = rules.min_items
            && items.len() < min
        {
            return Err(self.error(
                ValidationCode::MinItems,
                format!("{} must have at least {min} items", self.label()),
            ));
        }
        if let Some(max) = rules.max_items
            && items.len() > max
        {
            return Err(self.error(
                ValidationCode::MaxItems,
                format!("{} must have at most {max} items", self.label()),
            ));
        }
        if rules.unique_items {
            let mut seen = HashSet::new();
            if !items.iter().all(|item| seen.insert(item.to_string())) {
                return Err(self.error(
                    ValidationCode::UniqueItems,
                    format!("{} must not contain duplicate items", self.label()),
                ));
            }
        }
        Ok(())
    }

    fn is_missing(&self, value: &Value) -> bool {
        match self.field.field_type {
            FieldType::Checkbox | FieldType::Switch => {
                value.is_empty() || *value == Value::Bool(false)
            }
            _ => value.is_empty(),
        }
    }

    fn label(&self) -> &str {
        self.field.display_label()
    }

    fn override_message(
        &self,
        pick: impl FnOnce(&ValidationMessages) -> &Option<String>,
    ) -> Option<String> {
        self.field
            .validation
            .as_ref()
            .and_then(|v| v.messages.as_ref())
            .and_then(|m| pick(m).clone())
            .filter(|s| !s.is_empty())
    }

    fn error(&self, code: ValidationCode, message: impl Into<String>) -> FieldValidationError {
        FieldValidationError::new(self.field.name.clone(), code, message)
    }
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let domain_ok = !domain.is_empty()
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| {
            !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        });
    local_ok && domain_ok && tld_ok
}

fn is_http_url(s: &str) -> bool {
    let Some(rest) = s
        .strip_prefix("http://")
        .or_else(|| s.strip_prefix("https://"))
    else {
        return false;
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) if !first.is_whitespace() && !"/$.?#".contains(first) => {}
        _ => return false,
    }
    rest.chars().count() >= 2 && !rest.chars().any(char::is_whitespace)
}

fn is_phone(s: &str) -> bool {
    let digits = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .count();
    (7..=15).contains(&digits)
}

fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

//! Validation UI state and the query surface of a validation orchestrator.

use std::{fmt, time::Duration};

use serde::Serialize;

/// Per-field validation state used for presentation feedback.
///
/// This is UI bookkeeping only (spinners, border colors). Whether a field
/// passes is decided by its error list, never by this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationState {
    #[default]
    Idle,
    Validating,
    Valid,
    Invalid,
    Warning,
}

impl ValidationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Warning => "warning",
        }
    }

    /// CSS class marking the field container, `None` for [`ValidationState::Idle`].
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Validating => Some("field-validating"),
            Self::Valid => Some("field-valid"),
            Self::Invalid => Some("field-invalid"),
            Self::Warning => Some("field-warning"),
        }
    }
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of an external component tracking in-flight validations.
///
/// Renderers query it to decorate output with validation hints; they never
/// block on it.
pub trait ValidationOrchestrator: Send + Sync {
    /// Current UI state of `field`.
    fn validation_state_for_field(&self, field: &str) -> ValidationState;

    /// Whether an async validation for `field` is running.
    fn is_field_validating(&self, field: &str) -> bool;

    /// Errors reported by the last completed validation of `field`.
    fn field_errors(&self, field: &str) -> Vec<String>;

    /// Whether `field` is validated through a server round-trip.
    fn has_async_validation(&self, field: &str) -> bool;

    /// Names of fields with a validation in flight.
    fn pending_validations(&self) -> Vec<String>;

    /// Whether any validation is in flight.
    fn is_validation_in_progress(&self) -> bool;

    /// Debounce applied before triggering async validation of `field`.
    fn debounce_for_field(&self, _field: &str) -> Duration {
        Duration::from_millis(300)
    }
}

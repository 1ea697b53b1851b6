//! In-process tracking of field validations in flight.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Duration,
};

use formview_core::{ValidationOrchestrator, ValidationState};

use crate::state::StateManager;

#[derive(Debug, Default)]
struct TrackerState {
    states: BTreeMap<String, ValidationState>,
    errors: BTreeMap<String, Vec<String>>,
    warnings: BTreeMap<String, Vec<String>>,
    pending: BTreeSet<String>,
    async_fields: BTreeSet<String>,
    debounce: BTreeMap<String, Duration>,
}

/// Thread-safe [`ValidationOrchestrator`] driven by explicit start/complete
/// calls from whatever performs the validations.
///
/// When a [`StateManager`] is attached, state transitions and completed
/// error lists are mirrored into it so the next render sees them.
#[derive(Debug)]
pub struct ValidationTracker {
    inner: RwLock<TrackerState>,
    state_manager: Option<Arc<StateManager>>,
    default_debounce: Duration,
}

impl Default for ValidationTracker {
    fn default() -> Self {
        Self {
            inner: RwLock::default(),
            state_manager: None,
            default_debounce: Duration::from_millis(300),
        }
    }
}

impl ValidationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state_manager(mut self, state_manager: Arc<StateManager>) -> Self {
        self.state_manager = Some(state_manager);
        self
    }

    pub fn with_default_debounce(mut self, debounce: Duration) -> Self {
        self.default_debounce = debounce;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, TrackerState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TrackerState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark `field` as validated through a server round-trip.
    pub fn register_async_field(&self, field: &str, debounce: Option<Duration>) {
        let mut inner = self.write();
        inner.async_fields.insert(field.to_string());
        if let Some(debounce) = debounce {
            inner.debounce.insert(field.to_string(), debounce);
        }
    }

    /// Record that a validation of `field` has started.
    pub fn start_validation(&self, field: &str) {
        {
            let mut inner = self.write();
            inner.pending.insert(field.to_string());
            inner
                .states
                .insert(field.to_string(), ValidationState::Validating);
        }
        tracing::trace!(field, "validation started");
        self.mirror_state(field, ValidationState::Validating);
    }

    /// Record the outcome of a validation of `field`. An empty `errors` list
    /// means it passed.
    pub fn complete_validation(&self, field: &str, errors: Vec<String>) {
        let state = if errors.is_empty() {
            ValidationState::Valid
        } else {
            ValidationState::Invalid
        };
        self.finish(field, state, errors);
    }

    /// Record a passing validation that produced warnings.
    pub fn complete_with_warnings(&self, field: &str, warnings: Vec<String>) {
        self.finish(field, ValidationState::Warning, warnings);
    }

    fn finish(&self, field: &str, state: ValidationState, messages: Vec<String>) {
        {
            let mut inner = self.write();
            inner.pending.remove(field);
            inner.states.insert(field.to_string(), state);
            inner.errors.remove(field);
            inner.warnings.remove(field);
            if !messages.is_empty() {
                let target = if state == ValidationState::Warning {
                    &mut inner.warnings
                } else {
                    &mut inner.errors
                };
                target.insert(field.to_string(), messages.clone());
            }
        }
        tracing::debug!(field, state = %state, "validation completed");

        self.mirror_state(field, state);
        if state != ValidationState::Warning
            && let Some(sm) = &self.state_manager
            && let Err(e) = sm.set_field_errors(field, messages)
        {
            tracing::warn!(field, error = %e, "could not mirror validation errors");
        }
    }

    /// Warnings from the last validation of `field`.
    pub fn field_warnings(&self, field: &str) -> Vec<String> {
        self.read().warnings.get(field).cloned().unwrap_or_default()
    }

    /// Forget everything recorded for `field`.
    pub fn clear_field(&self, field: &str) {
        let mut inner = self.write();
        inner.states.remove(field);
        inner.errors.remove(field);
        inner.warnings.remove(field);
        inner.pending.remove(field);
    }

    fn mirror_state(&self, field: &str, state: ValidationState) {
        if let Some(sm) = &self.state_manager
            && let Err(e) = sm.set_validation_state(field, state)
        {
            tracing::warn!(field, error = %e, "could not mirror validation state");
        }
    }
}

impl ValidationOrchestrator for ValidationTracker {
    fn validation_state_for_field(&self, field: &str) -> ValidationState {
        self.read().states.get(field).copied().unwrap_or_default()
    }

    fn is_field_validating(&self, field: &str) -> bool {
        self.read().pending.contains(field)
    }

    fn field_errors(&self, field: &str) -> Vec<String> {
        self.read().errors.get(field).cloned().unwrap_or_default()
    }

    fn has_async_validation(&self, field: &str) -> bool {
        self.read().async_fields.contains(field)
    }

    fn pending_validations(&self) -> Vec<String> {
        self.read().pending.iter().cloned().collect()
    }

    fn is_validation_in_progress(&self) -> bool {
        !self.read().pending.is_empty()
    }

    fn debounce_for_field(&self, field: &str) -> Duration {
        self.read()
            .debounce
            .get(field)
            .copied()
            .unwrap_or(self.default_debounce)
    }
}

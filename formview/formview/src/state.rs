//! Concurrent per-session form state.

use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::{DateTime, Utc};
use formview_core::{Field, FormContext, Schema, ValidationState, Value};
use serde::Serialize;

use crate::error::StateError;

#[derive(Debug, Default)]
struct FormState {
    values: BTreeMap<String, Value>,
    errors: BTreeMap<String, Vec<String>>,
    touched: BTreeMap<String, bool>,
    dirty: BTreeMap<String, bool>,
    initial: BTreeMap<String, Value>,
    validation_states: BTreeMap<String, ValidationState>,
    validation_times: BTreeMap<String, DateTime<Utc>>,
}

impl FormState {
    fn fill_defaults(&mut self, schema: &Schema) {
        for field in &schema.fields {
            if !self.values.contains_key(&field.name) {
                self.values.insert(field.name.clone(), field.default_value());
            }
        }
    }

    fn set_errors(&mut self, field: &str, errors: Vec<String>) {
        if errors.is_empty() {
            self.errors.remove(field);
        } else {
            self.errors.insert(field.to_string(), errors);
        }
    }

    fn validate(&mut self, ctx: &FormContext, field: &Field) -> Result<(), StateError> {
        let value = self.values.get(&field.name).cloned().unwrap_or_default();
        match field.validate_value(ctx, &value) {
            Ok(()) => {
                self.errors.remove(&field.name);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(field = %field.name, code = %e.code, "field validation failed");
                self.set_errors(&field.name, vec![e.message.clone()]);
                Err(e.into())
            }
        }
    }

    fn recompute_dirty(&mut self, field: &str) {
        let dirty = match (self.initial.get(field), self.values.get(field)) {
            (Some(initial), Some(current)) => !values_equal(initial, current),
            (Some(initial), None) => !initial.is_null(),
            (None, _) => false,
        };
        self.dirty.insert(field.to_string(), dirty);
    }

    fn is_valid(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }
}

/// Values, errors, touched/dirty flags and validation UI state of one form
/// session.
///
/// Every method takes the single readers-writer lock for its whole duration,
/// so each call observes a consistent map set. Accessors return owned
/// copies. Mutations naming a field the schema does not define fail with
/// [`StateError::UnknownField`] before anything is changed.
#[derive(Debug)]
pub struct StateManager {
    schema: Arc<Schema>,
    state: RwLock<FormState>,
}

impl StateManager {
    /// Create state from an initial-data snapshot; fields missing from it
    /// start at their schema default.
    pub fn new(schema: Arc<Schema>, initial: BTreeMap<String, Value>) -> Result<Self, StateError> {
        check_known(&schema, initial.keys())?;

        let mut state = FormState {
            values: initial.clone(),
            initial,
            ..Default::default()
        };
        state.fill_defaults(&schema);

        Ok(Self {
            schema,
            state: RwLock::new(state),
        })
    }

    /// Fresh state with every field at its schema default.
    pub fn empty(schema: Arc<Schema>) -> Self {
        let mut state = FormState::default();
        state.fill_defaults(&schema);
        Self {
            schema,
            state: RwLock::new(state),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    fn read(&self) -> RwLockReadGuard<'_, FormState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FormState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn field(&self, name: &str) -> Result<&Field, StateError> {
        self.schema
            .field(name)
            .ok_or_else(|| StateError::UnknownField {
                field: name.to_string(),
            })
    }

    pub fn get_value(&self, field: &str) -> Option<Value> {
        self.read().values.get(field).cloned()
    }

    pub fn get_all_values(&self) -> BTreeMap<String, Value> {
        self.read().values.clone()
    }

    pub fn get_field_errors(&self, field: &str) -> Vec<String> {
        self.read().errors.get(field).cloned().unwrap_or_default()
    }

    /// Errors of every field with at least one message.
    pub fn get_all_errors(&self) -> BTreeMap<String, Vec<String>> {
        self.read()
            .errors
            .iter()
            .filter(|(_, errors)| !errors.is_empty())
            .map(|(field, errors)| (field.clone(), errors.clone()))
            .collect()
    }

    pub fn is_field_touched(&self, field: &str) -> bool {
        self.read().touched.get(field).copied().unwrap_or(false)
    }

    pub fn is_field_dirty(&self, field: &str) -> bool {
        self.read().dirty.get(field).copied().unwrap_or(false)
    }

    /// Whether any field differs from its baseline.
    pub fn is_dirty(&self) -> bool {
        self.read().dirty.values().any(|d| *d)
    }

    /// No field has a non-empty error list.
    pub fn is_valid(&self) -> bool {
        self.read().is_valid()
    }

    /// Store `value`, mark the field touched, recompute dirty and run the
    /// field's validation.
    ///
    /// Only an unknown field name is an error. A validation failure is
    /// recorded and can be read back with [`StateManager::get_field_errors`].
    pub fn set_value(&self, field: &str, value: impl Into<Value>) -> Result<(), StateError> {
        let def = self.field(field)?;
        let value = value.into();
        let ctx = FormContext::background();

        let mut state = self.write();
        state.values.insert(field.to_string(), value);
        state.touched.insert(field.to_string(), true);
        state.recompute_dirty(field);
        state.errors.remove(field);
        // Recorded in the error map; not a failure of the mutation.
        let _ = state.validate(&ctx, def);

        tracing::trace!(
            field,
            dirty = state.dirty.get(field).copied().unwrap_or(false),
            "set field value"
        );
        Ok(())
    }

    pub fn set_field_touched(&self, field: &str, touched: bool) -> Result<(), StateError> {
        self.field(field)?;
        self.write().touched.insert(field.to_string(), touched);
        Ok(())
    }

    pub fn set_field_dirty(&self, field: &str, dirty: bool) -> Result<(), StateError> {
        self.field(field)?;
        self.write().dirty.insert(field.to_string(), dirty);
        Ok(())
    }

    /// Replace the error list of `field`; an empty list clears it.
    pub fn set_field_errors(&self, field: &str, errors: Vec<String>) -> Result<(), StateError> {
        self.field(field)?;
        self.write().set_errors(field, errors);
        Ok(())
    }

    pub fn clear_field_errors(&self, field: &str) -> Result<(), StateError> {
        self.field(field)?;
        self.write().errors.remove(field);
        Ok(())
    }

    pub fn clear_all_errors(&self) {
        self.write().errors.clear();
    }

    /// Re-validate one field, recording or clearing its errors.
    pub fn validate_field(&self, ctx: &FormContext, field: &str) -> Result<(), StateError> {
        let def = self.field(field)?;
        self.write().validate(ctx, def)
    }

    /// Clear all errors and re-validate every field in declaration order.
    ///
    /// Returns the first failure for convenience; the full result is
    /// [`StateManager::get_all_errors`].
    pub fn validate_all(&self, ctx: &FormContext) -> Result<(), StateError> {
        let mut state = self.write();
        state.errors.clear();

        let mut first = None;
        for field in &self.schema.fields {
            if let Err(e) = state.validate(ctx, field) {
                if first.is_none() {
                    first = Some(e);
                }
            }
        }
        tracing::debug!(invalid = state.errors.len(), "validated all fields");
        first.map_or(Ok(()), Err)
    }

    /// Restore the initial snapshot and schema defaults and clear errors,
    /// touched and dirty flags.
    ///
    /// Validation UI states and timestamps are kept.
    pub fn reset(&self) {
        let mut state = self.write();
        state.values = state.initial.clone();
        state.fill_defaults(&self.schema);
        state.errors.clear();
        state.touched.clear();
        state.dirty.clear();
        tracing::debug!("form state reset");
    }

    /// Replace the dirty baseline with `baseline` and recompute dirty flags
    /// for every field with a value. Current values are untouched.
    pub fn update_initial_data(
        &self,
        baseline: BTreeMap<String, Value>,
    ) -> Result<(), StateError> {
        check_known(&self.schema, baseline.keys())?;

        let mut state = self.write();
        state.initial = baseline;
        let fields: Vec<String> = state.values.keys().cloned().collect();
        for field in &fields {
            state.recompute_dirty(field);
        }
        Ok(())
    }

    /// Pin the baseline of one field. A field without a current value
    /// takes `value` as its current value too.
    pub fn set_initial_value(
        &self,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<(), StateError> {
        self.field(field)?;
        let value = value.into();

        let mut state = self.write();
        state
            .values
            .entry(field.to_string())
            .or_insert_with(|| value.clone());
        state.initial.insert(field.to_string(), value);
        state.recompute_dirty(field);
        Ok(())
    }

    /// Current values of dirty fields.
    pub fn get_changed_values(&self) -> BTreeMap<String, Value> {
        let state = self.read();
        state
            .dirty
            .iter()
            .filter(|(_, dirty)| **dirty)
            .filter_map(|(field, _)| {
                state
                    .values
                    .get(field)
                    .map(|value| (field.clone(), value.clone()))
            })
            .collect()
    }

    /// Record the validation UI state of `field` and stamp the time.
    pub fn set_validation_state(
        &self,
        field: &str,
        validation_state: ValidationState,
    ) -> Result<(), StateError> {
        self.field(field)?;
        let mut state = self.write();
        state
            .validation_states
            .insert(field.to_string(), validation_state);
        state.validation_times.insert(field.to_string(), Utc::now());
        Ok(())
    }

    /// UI state of `field`, [`ValidationState::Idle`] when never set.
    pub fn get_validation_state(&self, field: &str) -> ValidationState {
        self.read()
            .validation_states
            .get(field)
            .copied()
            .unwrap_or_default()
    }

    /// State of `field` if one was ever recorded.
    pub fn recorded_validation_state(&self, field: &str) -> Option<ValidationState> {
        self.read().validation_states.get(field).copied()
    }

    pub fn set_validation_time(&self, field: &str, at: DateTime<Utc>) -> Result<(), StateError> {
        self.field(field)?;
        self.write().validation_times.insert(field.to_string(), at);
        Ok(())
    }

    pub fn get_validation_time(&self, field: &str) -> Option<DateTime<Utc>> {
        self.read().validation_times.get(field).copied()
    }

    pub fn has_fields_in_state(&self, validation_state: ValidationState) -> bool {
        self.read()
            .validation_states
            .values()
            .any(|s| *s == validation_state)
    }

    /// Fields currently in `validation_state`, sorted by name.
    pub fn get_fields_in_state(&self, validation_state: ValidationState) -> Vec<String> {
        self.read()
            .validation_states
            .iter()
            .filter(|(_, s)| **s == validation_state)
            .map(|(field, _)| field.clone())
            .collect()
    }

    pub fn get_all_validation_states(&self) -> BTreeMap<String, ValidationState> {
        self.read().validation_states.clone()
    }

    pub fn clear_validation_state(&self, field: &str) -> Result<(), StateError> {
        self.field(field)?;
        let mut state = self.write();
        state.validation_states.remove(field);
        state.validation_times.remove(field);
        Ok(())
    }

    pub fn clear_all_validation_states(&self) {
        let mut state = self.write();
        state.validation_states.clear();
        state.validation_times.clear();
    }

    pub fn is_validation_in_progress(&self) -> bool {
        self.has_fields_in_state(ValidationState::Validating)
    }

    pub fn get_validation_summary(&self) -> ValidationSummary {
        let state = self.read();
        let mut summary = ValidationSummary {
            states: state.validation_states.clone(),
            last_validated: state.validation_times.clone(),
            total_fields: state.validation_states.len(),
            ..Default::default()
        };
        for s in state.validation_states.values() {
            match s {
                ValidationState::Valid => summary.valid_fields += 1,
                ValidationState::Invalid => summary.invalid_fields += 1,
                ValidationState::Validating => summary.validating_fields += 1,
                ValidationState::Warning => summary.warning_fields += 1,
                ValidationState::Idle => {}
            }
        }
        summary
    }

    /// Consistent copy of the business state taken under one lock.
    pub fn snapshot(&self) -> FormStateSnapshot {
        let state = self.read();
        FormStateSnapshot {
            values: state.values.clone(),
            errors: state
                .errors
                .iter()
                .filter(|(_, e)| !e.is_empty())
                .map(|(f, e)| (f.clone(), e.clone()))
                .collect(),
            touched: state.touched.clone(),
            dirty: state.dirty.clone(),
            valid: state.is_valid(),
        }
    }
}

/// Point-in-time copy of a form's business state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormStateSnapshot {
    pub values: BTreeMap<String, Value>,
    pub errors: BTreeMap<String, Vec<String>>,
    pub touched: BTreeMap<String, bool>,
    pub dirty: BTreeMap<String, bool>,
    pub valid: bool,
}

/// Counts of fields per validation UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub states: BTreeMap<String, ValidationState>,
    pub last_validated: BTreeMap<String, DateTime<Utc>>,
    pub total_fields: usize,
    pub valid_fields: usize,
    pub invalid_fields: usize,
    pub validating_fields: usize,
    pub warning_fields: usize,
}

impl ValidationSummary {
    /// No field is invalid or still validating.
    pub fn is_form_valid(&self) -> bool {
        self.invalid_fields == 0 && self.validating_fields == 0
    }

    pub fn is_form_validating(&self) -> bool {
        self.validating_fields > 0
    }
}

/// Loose equality used for dirty tracking.
///
/// `Null` equals only `Null`. Lists compare element-wise in order, so a
/// reordered selection counts as a change. Everything else compares by its
/// text form, which makes `Int(5)` equal to `String("5")`.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|(x, y)| x.to_string() == y.to_string())
        }
        _ => a.to_string() == b.to_string(),
    }
}

fn check_known<'a>(
    schema: &Schema,
    mut names: impl Iterator<Item = &'a String>,
) -> Result<(), StateError> {
    match names.find(|name| !schema.has_field(name)) {
        Some(name) => Err(StateError::UnknownField {
            field: name.clone(),
        }),
        None => Ok(()),
    }
}


use std::{sync::Arc, time::Duration};

use formview::{
    StateManager, ValidationTracker,
    core::{ValidationOrchestrator, ValidationState},
};
use test_helpers::shared_order_schema;

#[test]
fn start_and_complete_move_through_states() {
    let tracker = ValidationTracker::new();
    assert_eq!(
        tracker.validation_state_for_field("email"),
        ValidationState::Idle
    );
    assert!(!tracker.is_validation_in_progress());

    tracker.start_validation("email");
    assert!(tracker.is_field_validating("email"));
    assert_eq!(tracker.pending_validations(), vec!["email".to_string()]);

    tracker.complete_validation("email", vec!["Taken".to_string()]);
    assert!(!tracker.is_field_validating("email"));
    assert_eq!(
        tracker.validation_state_for_field("email"),
        ValidationState::Invalid
    );
    assert_eq!(tracker.field_errors("email"), vec!["Taken"]);

    tracker.complete_validation("email", Vec::new());
    assert_eq!(
        tracker.validation_state_for_field("email"),
        ValidationState::Valid
    );
    assert!(tracker.field_errors("email").is_empty());
}

#[test]
fn warnings_are_kept_apart_from_errors() {
    let tracker = ValidationTracker::new();
    tracker.complete_with_warnings("name", vec!["Looks like a nickname".to_string()]);
    assert_eq!(
        tracker.validation_state_for_field("name"),
        ValidationState::Warning
    );
    assert!(tracker.field_errors("name").is_empty());
    assert_eq!(tracker.field_warnings("name"), vec!["Looks like a nickname"]);

    tracker.clear_field("name");
    assert_eq!(
        tracker.validation_state_for_field("name"),
        ValidationState::Idle
    );
    assert!(tracker.field_warnings("name").is_empty());
}

#[test]
fn async_registration_and_debounce() {
    let tracker = ValidationTracker::new().with_default_debounce(Duration::from_millis(250));
    tracker.register_async_field("email", Some(Duration::from_millis(80)));
    tracker.register_async_field("name", None);

    assert!(tracker.has_async_validation("email"));
    assert!(!tracker.has_async_validation("qty"));
    assert_eq!(
        tracker.debounce_for_field("email"),
        Duration::from_millis(80)
    );
    assert_eq!(
        tracker.debounce_for_field("name"),
        Duration::from_millis(250)
    );
}

#[test]
fn outcomes_are_mirrored_into_state_manager() {
    let sm = Arc::new(StateManager::empty(shared_order_schema()));
    let tracker = ValidationTracker::new().with_state_manager(Arc::clone(&sm));

    tracker.start_validation("email");
    assert_eq!(sm.get_validation_state("email"), ValidationState::Validating);
    assert!(sm.is_validation_in_progress());

    tracker.complete_validation("email", vec!["Already registered".to_string()]);
    assert_eq!(sm.get_validation_state("email"), ValidationState::Invalid);
    assert_eq!(sm.get_field_errors("email"), vec!["Already registered"]);
    assert!(!sm.is_valid());

    tracker.complete_validation("email", Vec::new());
    assert!(sm.get_field_errors("email").is_empty());
    assert!(sm.is_valid());
}

#[test]
fn unknown_fields_are_tracked_but_not_mirrored() {
    let sm = Arc::new(StateManager::empty(shared_order_schema()));
    let tracker = ValidationTracker::new().with_state_manager(Arc::clone(&sm));

    tracker.complete_validation("ghost", vec!["x".to_string()]);
    assert_eq!(
        tracker.validation_state_for_field("ghost"),
        ValidationState::Invalid
    );
    assert!(sm.get_all_validation_states().is_empty());
    assert!(sm.get_all_errors().is_empty());
}

#[test]
fn tracker_is_usable_as_shared_orchestrator() {
    let tracker: Arc<dyn ValidationOrchestrator> = Arc::new(ValidationTracker::new());
    std::thread::scope(|s| {
        for _ in 0..4 {
            let tracker = Arc::clone(&tracker);
            s.spawn(move || {
                tracker.pending_validations();
                tracker.validation_state_for_field("email");
            });
        }
    });
    assert!(!tracker.is_validation_in_progress());
}

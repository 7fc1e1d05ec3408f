//! Tests for database error types.

use crate::db::DbError;

#[test]
fn not_found_message_names_the_id() {
    let e = DbError::NotFound {
        id: "a1b2c3d4".to_string(),
    };
    assert_eq!(e.to_string(), "Habit not found: 'a1b2c3d4'");
}

#[test]
fn invalid_status_message_lists_the_expected_literals() {
    let e = DbError::InvalidStatus {
        value: "finished".to_string(),
    };
    let msg = e.to_string();
    assert!(msg.contains("'finished'"));
    assert!(msg.contains("pending, in_progress or done"));
}

#[test]
fn validation_message_carries_the_reason() {
    let e = DbError::Validation {
        message: "title must not be empty".to_string(),
    };
    assert_eq!(e.to_string(), "Validation error: title must not be empty");
}

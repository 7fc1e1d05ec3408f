//! Tests for domain models.

use crate::db::{HabitQuery, HabitStatus};

#[test]
fn status_display_round_trips_through_from_str() {
    for status in [
        HabitStatus::Pending,
        HabitStatus::InProgress,
        HabitStatus::Done,
    ] {
        let literal = status.to_string();
        let parsed: HabitStatus = literal.parse().expect("literal should parse back");
        assert_eq!(parsed, status);
    }
}

#[test]
fn status_serializes_as_snake_case() {
    assert_eq!(
        serde_json::to_string(&HabitStatus::InProgress).unwrap(),
        "\"in_progress\""
    );
    assert_eq!(
        serde_json::from_str::<HabitStatus>("\"done\"").unwrap(),
        HabitStatus::Done
    );
}

#[test]
fn status_defaults_to_pending() {
    assert_eq!(HabitStatus::default(), HabitStatus::Pending);
}

#[test]
fn query_defaults() {
    let q = HabitQuery::default();
    assert_eq!(q.skip, 0);
    assert_eq!(q.limit, 100);
    assert!(!q.include_inactive);
}

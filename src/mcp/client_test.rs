//! Tests for the API forwarding client.

use crate::mcp::{ForwardError, HabitApiClient};

#[test]
fn explicit_url_is_used() {
    let client = HabitApiClient::new(
        Some("http://custom:8080".to_string()),
        "token".to_string(),
    );
    assert_eq!(client.base_url(), "http://custom:8080");
}

#[test]
fn base_url_falls_back_to_a_default() {
    let client = HabitApiClient::new(None, "token".to_string());
    // Actual value depends on HABITD_API_URL if set; there is always one.
    assert!(!client.base_url().is_empty());
}

#[test]
fn api_error_display_carries_status_and_body() {
    let e = ForwardError::ApiError {
        status: 404,
        message: "{\"error\":\"Habit not found: 'nonexist'\"}".to_string(),
    };
    let msg = e.to_string();
    assert!(msg.contains("404"));
    assert!(msg.contains("Habit not found"));
}

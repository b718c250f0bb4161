//! Custom assertion macros and utilities
//!
//! Provides assertions for the JSON error body shared by every failing
//! endpoint.

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert the status and the `{ error, status }` body; returns the message
pub fn assert_error(response: &TestResponse, status: StatusCode) -> String {
    response.assert_status(status);

    let body: Value = response.json();
    assert_eq!(body["status"], status.as_u16(), "unexpected body: {}", body);
    body["error"]
        .as_str()
        .unwrap_or_else(|| panic!("error message missing: {}", body))
        .to_string()
}

//! Shared Error Types
//!
//! This module defines error types for failures that are detectable from the
//! payload alone, before any storage is consulted. Clients can run the same
//! checks locally before sending a request.
//!
//! # Error Categories
//!
//! - `ValidationError` - A request field failed validation
//! - `UnknownRole` - A role string did not name a known role
//!
//! # Usage
//!
//! ```rust
//! use quillpost::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "must not be empty");
//! ```
use thiserror::Error;

/// Shared error types raised while validating requests
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Role string that is neither `ADMIN` nor `USER`
    #[error("Unknown role: {value}")]
    UnknownRole {
        /// The rejected value
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown-role error
    pub fn unknown_role(value: impl Into<String>) -> Self {
        Self::UnknownRole {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("email", "Invalid email format");
        match error {
            SharedError::ValidationError { field, message } => {
                assert_eq!(field, "email");
                assert_eq!(message, "Invalid email format");
            }
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_unknown_role() {
        let error = SharedError::unknown_role("ROOT");
        assert_eq!(error.to_string(), "Unknown role: ROOT");
    }

    #[test]
    fn test_error_display() {
        let error = SharedError::validation("password", "too short");
        let display = format!("{}", error);
        assert!(display.contains("password"));
        assert!(display.contains("too short"));
    }
}

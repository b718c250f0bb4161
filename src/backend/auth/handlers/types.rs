/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * These types are shared across register, login, and get_me handlers.
 */

use serde::{Deserialize, Serialize};

use crate::shared::validation::{validate_email, validate_password};
use crate::shared::SharedError;

/// Register request
///
/// Contains the email and password for user registration.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    /// User's password (will be verified against stored hash)
    pub password: String,
}

/// Token response
///
/// Returned by register and login handlers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// JWT bearer token
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_is_camel_case() {
        let json = serde_json::to_value(TokenResponse {
            access_token: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "accessToken": "abc" }));
    }

    #[test]
    fn test_register_rejects_unknown_fields() {
        let result: Result<RegisterRequest, _> = serde_json::from_str(
            r#"{"email":"a@b.c","password":"123456","role":"ADMIN"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_register_validation() {
        let request = RegisterRequest {
            email: "a@b.c".to_string(),
            password: "123".to_string(),
        };
        assert!(request.validate().is_err());
    }
}

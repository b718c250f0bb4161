//! Payload of `PATCH /user/{id}`.

use serde::{Deserialize, Serialize};

use crate::shared::models::Role;
use crate::shared::validation::{validate_email, validate_password};
use crate::shared::SharedError;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_uppercase() {
        let request: UpdateUserRequest = serde_json::from_str(r#"{"role":"ADMIN"}"#).unwrap();
        assert_eq!(request.role, Some(Role::Admin));

        let bad: Result<UpdateUserRequest, _> = serde_json::from_str(r#"{"role":"ROOT"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_validate_checks_present_fields_only() {
        assert!(UpdateUserRequest::default().validate().is_ok());

        let short = UpdateUserRequest {
            password: Some("123".to_string()),
            ..Default::default()
        };
        assert!(short.validate().is_err());
    }
}

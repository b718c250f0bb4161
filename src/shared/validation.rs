//! Credential checks shared by registration and user updates.

use crate::shared::error::SharedError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// An email needs a non-empty local part and domain around a single `@`
pub fn validate_email(email: &str) -> Result<(), SharedError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(SharedError::validation("email", "must be a valid email address"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(SharedError::validation(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    Ok(())
}

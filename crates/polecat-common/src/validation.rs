//! Input validation utilities.
//!
//! Request payloads derive `validator::Validate`; this module flattens the result into
//! the field-level [`PolecatError::Validation`] the boundary renders.

use std::sync::LazyLock;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::PolecatError;

/// `\w{3,}`, the same alphabet the username column has always accepted.
pub static USERNAME_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\w{3,}$").expect("static regex"));

/// Validate a request body, returning the first failing field.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), PolecatError> {
    body.validate().map_err(first_field_error)
}

fn first_field_error(errors: ValidationErrors) -> PolecatError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    // HashMap order is arbitrary; report deterministically.
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let Some((field, errs)) = fields.into_iter().next() else {
        return PolecatError::Validation {
            field: None,
            message: "Invalid input".into(),
        };
    };

    let message = errs
        .iter()
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| format!("Invalid value for '{field}'"));

    PolecatError::field(&field, message)
}

/// Passwords need an uppercase letter, a lowercase letter and a digit.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());

    if upper && lower && digit {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength").with_message(
            "Password must contain an uppercase character, a lowercase character and a number"
                .into(),
        ))
    }
}

/// Reject values that are only whitespace (a blank form field).
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message("This field cannot be blank".into()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, max = 5, message = "too long"))]
        name: String,
        #[validate(custom(function = "validate_password_strength"))]
        password: String,
    }

    #[test]
    fn password_strength() {
        assert!(validate_password_strength("Password123").is_ok());
        assert!(validate_password_strength("password123").is_err());
        assert!(validate_password_strength("PASSWORD123").is_err());
        assert!(validate_password_strength("Password").is_err());
    }

    #[test]
    fn username_regex() {
        assert!(USERNAME_REGEX.is_match("johndoe"));
        assert!(USERNAME_REGEX.is_match("john_doe_2"));
        assert!(!USERNAME_REGEX.is_match("jo"));
        assert!(!USERNAME_REGEX.is_match("john doe"));
    }

    #[test]
    fn reports_first_field_alphabetically() {
        let probe = Probe {
            name: "far too long".into(),
            password: "weak".into(),
        };
        match validate_request(&probe) {
            Err(PolecatError::Validation { field, message }) => {
                assert_eq!(field.as_deref(), Some("name"));
                assert_eq!(message, "too long");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn blank_is_rejected() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank(" x ").is_ok());
    }
}

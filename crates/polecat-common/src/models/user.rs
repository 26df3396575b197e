//! User model — the identity layer.
//!
//! Users log in with their email; the username is what other club members see.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{USERNAME_REGEX, validate_not_blank, validate_password_strength};

/// A Polecat user account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    /// Login key, unique
    pub email: String,

    /// Unique handle (3-30 word characters)
    pub username: String,

    pub first_name: String,
    pub last_name: String,

    /// Free-text bio (up to 520 chars, may be empty)
    pub bio: String,

    pub experience_level: ExperienceLevel,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

/// Self-declared chess experience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Sign-up request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,

    #[validate(length(max = 30, message = "Username must be at most 30 characters"))]
    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username must consist of at least three alphanumericals"
    ))]
    pub username: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(max = 520, message = "Bio must be at most 520 characters"))]
    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub experience_level: ExperienceLevel,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,

    #[validate(must_match(other = "new_password", message = "Confirmation does not match password."))]
    pub password_confirmation: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Profile update. The whole profile is resubmitted, like the form it replaces.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub last_name: String,

    #[validate(length(max = 30, message = "Username must be at most 30 characters"))]
    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username must consist of at least three alphanumericals"
    ))]
    pub username: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    pub experience_level: ExperienceLevel,

    #[validate(length(max = 520, message = "Bio must be at most 520 characters"))]
    #[serde(default)]
    pub bio: String,
}

/// Password change request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password
    #[validate(length(min = 1, max = 128))]
    pub password: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,

    #[validate(must_match(other = "new_password", message = "Confirmation does not match password."))]
    pub password_confirmation: String,
}

/// Safe user representation for API responses (no sensitive fields)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub experience_level: ExperienceLevel,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            first_name: u.first_name,
            last_name: u.last_name,
            bio: u.bio,
            experience_level: u.experience_level,
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::PolecatError, validation::validate_request};

    fn sign_up() -> SignUpRequest {
        SignUpRequest {
            first_name: "John".into(),
            last_name: "Doe".into(),
            username: "johndoe".into(),
            email: "johndoe@example.org".into(),
            bio: "Opening theory nerd".into(),
            experience_level: ExperienceLevel::Intermediate,
            new_password: "Password123".into(),
            password_confirmation: "Password123".into(),
        }
    }

    #[test]
    fn valid_sign_up_passes() {
        assert!(validate_request(&sign_up()).is_ok());
    }

    #[test]
    fn mismatched_confirmation_is_a_field_error() {
        let mut req = sign_up();
        req.password_confirmation = "Password124".into();
        match validate_request(&req) {
            Err(PolecatError::Validation { field, .. }) => {
                assert_eq!(field.as_deref(), Some("password_confirmation"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn short_username_is_rejected() {
        let mut req = sign_up();
        req.username = "jd".into();
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn experience_level_defaults_to_beginner() {
        let req: SignUpRequest = serde_json::from_value(serde_json::json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "username": "janedoe",
            "email": "janedoe@example.org",
            "new_password": "Password123",
            "password_confirmation": "Password123",
        }))
        .expect("payload should deserialize");
        assert_eq!(req.experience_level, ExperienceLevel::Beginner);
        assert!(req.bio.is_empty());
    }
}

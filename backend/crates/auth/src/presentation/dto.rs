//! API DTOs (Data Transfer Objects)

use kernel::validation::{Validate, char_len_between, is_valid_email};
use kernel::FieldErrors;
use platform::password::MIN_PASSWORD_LENGTH;
use serde::{Deserialize, Serialize};

use crate::application::view::UserView;
use crate::domain::value_object::user_name::{USER_NAME_MAX_LENGTH, USER_NAME_MIN_LENGTH};

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// Missing fields deserialize as empty so they surface as field errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        errors.check(name.is_empty(), "name", "Name is required");
        errors.check(
            !char_len_between(name, USER_NAME_MIN_LENGTH, USER_NAME_MAX_LENGTH),
            "name",
            "Name must be between 3 and 50 characters",
        );
        validate_email(&mut errors, &self.email);
        errors.check(self.password.is_empty(), "password", "Password is required");
        errors.check(
            self.password.chars().count() < MIN_PASSWORD_LENGTH,
            "password",
            "Password must be at least 6 characters",
        );
        errors.into_result()
    }
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_email(&mut errors, &self.email);
        errors.check(self.password.is_empty(), "password", "Password is required");
        errors.into_result()
    }
}

fn validate_email(errors: &mut FieldErrors, email: &str) {
    let email = email.trim();
    errors.check(email.is_empty(), "email", "Email is required");
    errors.check(
        !is_valid_email(email),
        "email",
        "Email must be a valid email address",
    );
}

// ============================================================================
// User projection
// ============================================================================

/// Returned by register, login and `/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<UserView> for UserResponse {
    fn from(view: UserView) -> Self {
        Self {
            id: view.user_id.to_string(),
            name: view.name,
            email: view.email,
            role: view.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_field_errors() {
        let req = RegisterRequest {
            name: "ab".to_string(),
            email: "nope".to_string(),
            password: "12345".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name must be between 3 and 50 characters"));
        assert_eq!(errors.get("email"), Some("Email must be a valid email address"));
        assert_eq!(errors.get("password"), Some("Password must be at least 6 characters"));
    }

    #[test]
    fn test_register_request_missing_fields_are_required() {
        let errors = RegisterRequest::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn test_login_request() {
        let ok = LoginRequest {
            email: "a@b.co".to_string(),
            password: "x".to_string(),
        };
        assert!(ok.validate().is_ok());

        let errors = LoginRequest::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}

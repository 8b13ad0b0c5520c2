//! User Name Value Object
//!
//! Display name shown on orders and in `/auth/me`. Not unique.
//!
//! ## Invariants
//! - NFKC normalized, surrounding whitespace trimmed
//! - 3 to 50 characters (code points, after normalization)
//! - No control characters

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Name is required")]
    Empty,

    #[error("Name must be at least {} characters", USER_NAME_MIN_LENGTH)]
    TooShort,

    #[error("Name must be at most {} characters", USER_NAME_MAX_LENGTH)]
    TooLong,

    #[error("Name contains invalid characters")]
    InvalidCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: &str) -> Result<Self, UserNameError> {
        let normalized: String = raw.nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }
        let len = trimmed.chars().count();
        if len < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort);
        }
        if len > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// From the database (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Unicode NFKC normalization before hashing
//! - Zeroization of clear text on drop
//! - Optional application-wide pepper
//!
//! Services receive the hasher as `Arc<dyn CredentialHasher>` so tests and
//! deployments can swap the primitive.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length (bounds Argon2 input)
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters")]
    TooLong { max: usize, actual: usize },

    #[error("Password is required")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Not `Clone`, and `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize and check the registration policy
    ///
    /// ```rust
    /// use platform::password::ClearTextPassword;
    ///
    /// assert!(ClearTextPassword::new("secret1".to_string()).is_ok());
    /// assert!(ClearTextPassword::new("abc".to_string()).is_err());
    /// ```
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::for_verification(raw);
        password.check_policy()?;
        Ok(password)
    }

    /// Normalize without any policy check
    ///
    /// Used on login: a stored hash decides, not the current policy.
    pub fn for_verification(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        if self.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = self.0.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters other than tab/newline
        if self
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }
        Ok(())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// True if the hash was not produced by Argon2id
    pub fn needs_rehash(&self) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => parsed.algorithm != argon2::Algorithm::Argon2id.ident(),
            Err(_) => true,
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hashing capability
// ============================================================================

/// One-way credential hashing with verify
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError>;

    /// Never errors: an unparsable hash simply does not verify
    fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool;

    /// True if a verified password should be hashed again and stored
    fn needs_rehash(&self, hashed: &HashedPassword) -> bool {
        hashed.needs_rehash()
    }
}

/// Argon2id, OWASP default parameters (m=19456, t=2, p=1) unless overridden
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    pepper: Option<Vec<u8>>,
    params: Params,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pepper must be identical for hashing and verification
    pub fn with_pepper(pepper: impl Into<Vec<u8>>) -> Self {
        Self {
            pepper: Some(pepper.into()),
            ..Self::default()
        }
    }

    /// Minimum-cost parameters for tests and local tooling
    ///
    /// Verification always uses the parameters embedded in the stored hash,
    /// so hashes made here still verify under [`Argon2Hasher::new`].
    pub fn low_cost() -> Self {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
            .unwrap_or_default();
        Self {
            pepper: None,
            params,
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    fn peppered(&self, password: &ClearTextPassword) -> Vec<u8> {
        let mut combined = password.as_bytes().to_vec();
        if let Some(p) = &self.pepper {
            combined.extend_from_slice(p);
        }
        combined
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let mut input = self.peppered(password);
        let salt = SaltString::generate(OsRng);
        let result = self
            .argon2()
            .hash_password(&input, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));
        input.zeroize();
        result
    }

    fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return false;
        };
        let mut input = self.peppered(password);
        // Argon2 compares in constant time; algorithm and cost come from the hash
        let ok = self.argon2().verify_password(&input, &parsed).is_ok();
        input.zeroize();
        ok
    }

    /// Also true when the stored cost parameters differ from ours
    fn needs_rehash(&self, hashed: &HashedPassword) -> bool {
        if hashed.needs_rehash() {
            return true;
        }
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return true;
        };
        match Params::try_from(&parsed) {
            Ok(stored) => {
                stored.m_cost() != self.params.m_cost()
                    || stored.t_cost() != self.params.t_cost()
                    || stored.p_cost() != self.params.p_cost()
            }
            Err(_) => true,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("short".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::TooShort { min: 6, actual: 5 })
        ));
        assert!(ClearTextPassword::new("sixsix".to_string()).is_ok());
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let result = ClearTextPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("        ".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_control_characters_rejected() {
        let result = ClearTextPassword::new("abc\u{0007}defg".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_unicode_password() {
        let result = ClearTextPassword::new("パスワード安全です!".to_string());
        assert!(result.is_ok());
    }

    #[test]
    fn test_nfkc_normalization_matches() {
        let hasher = Argon2Hasher::new();
        // Fullwidth "ＡＢＣ" normalizes to "ABC"
        let hashed = hasher
            .hash(&ClearTextPassword::new("ＡＢＣdef1".to_string()).unwrap())
            .unwrap();
        assert!(hasher.verify(&ClearTextPassword::for_verification("ABCdef1".to_string()), &hashed));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::new();
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = hasher.hash(&password).unwrap();

        assert_ne!(hashed.as_phc_string(), "TestPassword123!");
        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(!hashed.needs_rehash());
        assert!(!hasher.needs_rehash(&hashed));
        assert!(hasher.verify(&password, &hashed));

        let wrong = ClearTextPassword::for_verification("WrongPassword123!".to_string());
        assert!(!hasher.verify(&wrong, &hashed));
    }

    #[test]
    fn test_hash_with_pepper() {
        let peppered = Argon2Hasher::with_pepper(b"my_secret_pepper".to_vec());
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = peppered.hash(&password).unwrap();

        assert!(peppered.verify(&password, &hashed));
        assert!(!Argon2Hasher::new().verify(&password, &hashed));
        assert!(!Argon2Hasher::with_pepper(b"wrong".to_vec()).verify(&password, &hashed));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = Argon2Hasher::new();
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = hasher.hash(&password).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(&password, &restored));
    }

    #[test]
    fn test_low_cost_hash_verifies_with_default_hasher() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = Argon2Hasher::low_cost().hash(&password).unwrap();
        assert!(Argon2Hasher::new().verify(&password, &hashed));
    }

    #[test]
    fn test_cost_change_needs_rehash() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let cheap = Argon2Hasher::low_cost().hash(&password).unwrap();

        assert!(!Argon2Hasher::low_cost().needs_rehash(&cheap));
        assert!(Argon2Hasher::new().needs_rehash(&cheap));
    }

    #[test]
    fn test_other_argon2_variant_verifies_but_needs_rehash() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let salt = SaltString::generate(OsRng);
        let argon2i = Argon2::new(Algorithm::Argon2i, Version::V0x13, Params::default())
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string();
        let legacy = HashedPassword::from_phc_string(argon2i).unwrap();

        let hasher = Argon2Hasher::new();
        assert!(legacy.needs_rehash());
        assert!(hasher.needs_rehash(&legacy));
        assert!(hasher.verify(&password, &legacy));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::for_verification("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hasher = format!("{:?}", Argon2Hasher::with_pepper(b"pep".to_vec()));
        assert!(!hasher.contains("pep\""));
    }
}

//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::cookie::{CookieConfig, SameSite};

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// `iss` claim of every token
    pub issuer: String,
    /// `aud` claim of every token
    pub audience: String,
    /// HS256 key for access tokens
    pub access_secret: String,
    /// HS256 key for refresh tokens, never equal to `access_secret`
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub access_cookie_name: String,
    pub refresh_cookie_name: String,
    /// Refresh cookie is only sent to this path
    pub refresh_cookie_path: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// Name of the role given to newly registered users
    pub default_role: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: "ecommerce-api".to_string(),
            audience: "ecommerce-client".to_string(),
            access_secret: String::new(),
            refresh_secret: String::new(),
            access_ttl: Duration::from_secs(30 * 60),
            refresh_ttl: Duration::from_secs(72 * 3600),
            access_cookie_name: "access_token".to_string(),
            refresh_cookie_name: "refresh_token".to_string(),
            refresh_cookie_path: "/auth/refresh".to_string(),
            cookie_secure: true,
            default_role: kernel::principal::roles::BUYER.to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with random, distinct secrets
    pub fn with_random_secrets() -> Self {
        Self {
            access_secret: platform::crypto::random_secret(32),
            refresh_secret: platform::crypto::random_secret(32),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    /// Access cookie: whole site, Lax
    pub fn access_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.access_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }

    /// Refresh cookie: refresh endpoint only, Strict
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.refresh_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: SameSite::Strict,
            path: self.refresh_cookie_path.clone(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_secret", &"[REDACTED]")
            .field("refresh_secret", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

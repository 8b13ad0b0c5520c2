//! Token Service
//!
//! Issues and verifies HS256-signed access and refresh tokens. The two token
//! classes use disjoint secrets; the store is never consulted here.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::{RefreshTokenId, RoleId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Registered claims present in both token classes
const REQUIRED_CLAIMS: &[&str] = &["exp", "nbf", "iss", "aud", "sub"];

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    uid: Uuid,
    rid: Uuid,
    sub: String,
    iss: String,
    aud: Vec<String>,
    iat: i64,
    nbf: i64,
    exp: i64,
    jti: Uuid,
}

/// No role claim: the role may change between refreshes
#[derive(Debug, Serialize, Deserialize)]
struct RefreshClaims {
    sub: Uuid,
    iss: String,
    aud: Vec<String>,
    iat: i64,
    nbf: i64,
    exp: i64,
    jti: Uuid,
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Remaining lifetime in seconds, used as cookie Max-Age
    pub fn max_age_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

/// Verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenClaims {
    pub user_id: UserId,
    pub role_id: RoleId,
    pub jti: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Verified refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenClaims {
    pub user_id: UserId,
    pub token_id: RefreshTokenId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub struct TokenService {
    issuer: String,
    audience: String,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        // Only HS256 is accepted, which rules out algorithm confusion
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(REQUIRED_CLAIMS);
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl_secs: ttl_secs(config.access_ttl),
            refresh_ttl_secs: ttl_secs(config.refresh_ttl),
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
        }
    }

    pub fn issue_access_token(&self, user_id: UserId, role_id: RoleId) -> AuthResult<IssuedToken> {
        self.issue_access_token_at(user_id, role_id, Utc::now())
    }

    pub(crate) fn issue_access_token_at(
        &self,
        user_id: UserId,
        role_id: RoleId,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let (iat, exp) = window(now, self.access_ttl_secs);
        let jti = Uuid::new_v4();
        let claims = AccessClaims {
            uid: user_id.into_uuid(),
            rid: role_id.into_uuid(),
            sub: user_id.to_string(),
            iss: self.issuer.clone(),
            aud: vec![self.audience.clone()],
            iat,
            nbf: iat,
            exp,
            jti,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding)?;
        issued(token, jti, iat, exp)
    }

    pub fn issue_refresh_token(&self, user_id: UserId) -> AuthResult<IssuedToken> {
        self.issue_refresh_token_at(user_id, Utc::now())
    }

    pub(crate) fn issue_refresh_token_at(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let (iat, exp) = window(now, self.refresh_ttl_secs);
        let jti = Uuid::new_v4();
        let claims = RefreshClaims {
            sub: user_id.into_uuid(),
            iss: self.issuer.clone(),
            aud: vec![self.audience.clone()],
            iat,
            nbf: iat,
            exp,
            jti,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding)?;
        issued(token, jti, iat, exp)
    }

    /// Every failure collapses to [`AuthError::InvalidToken`]
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        let data = decode::<AccessClaims>(token, &self.access_decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                AuthError::InvalidToken
            })?;
        let claims = data.claims;
        Ok(AccessTokenClaims {
            user_id: UserId::from_uuid(claims.uid),
            role_id: RoleId::from_uuid(claims.rid),
            jti: claims.jti,
            expires_at: timestamp(claims.exp).ok_or(AuthError::InvalidToken)?,
        })
    }

    /// Every failure collapses to [`AuthError::InvalidToken`]
    pub fn verify_refresh_token(&self, token: &str) -> AuthResult<RefreshTokenClaims> {
        let data = decode::<RefreshClaims>(token, &self.refresh_decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                AuthError::InvalidToken
            })?;
        let claims = data.claims;
        Ok(RefreshTokenClaims {
            user_id: UserId::from_uuid(claims.sub),
            token_id: RefreshTokenId::from_uuid(claims.jti),
            issued_at: timestamp(claims.iat).ok_or(AuthError::InvalidToken)?,
            expires_at: timestamp(claims.exp).ok_or(AuthError::InvalidToken)?,
        })
    }

    /// At-rest digest of a token (lowercase hex SHA-256)
    pub fn hash_token(token: &str) -> String {
        platform::crypto::sha256_hex(token.as_bytes())
    }
}

fn ttl_secs(ttl: std::time::Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}

fn window(now: DateTime<Utc>, ttl_secs: i64) -> (i64, i64) {
    let iat = now.timestamp();
    (iat, iat.saturating_add(ttl_secs))
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

fn issued(token: String, jti: Uuid, iat: i64, exp: i64) -> AuthResult<IssuedToken> {
    let out_of_range = || AuthError::Internal("token timestamp out of range".to_string());
    Ok(IssuedToken {
        token,
        jti,
        issued_at: timestamp(iat).ok_or_else(out_of_range)?,
        expires_at: timestamp(exp).ok_or_else(out_of_range)?,
    })
}

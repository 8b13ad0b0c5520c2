//! Refresh Token Record
//!
//! One row per issued refresh token. The row key is the token's `jti`, and
//! only the SHA-256 digest of the token is stored.
//!
//! `ACTIVE` (not revoked, not expired) -> `REVOKED` (terminal).

use chrono::{DateTime, Utc};
use kernel::id::{RefreshTokenId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    /// Equals the `jti` claim of the signed token
    pub token_id: RefreshTokenId,
    pub user_id: UserId,
    /// Lowercase hex SHA-256 of the token string
    pub token_hash: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshTokenRecord {
    pub fn new(
        token_id: RefreshTokenId,
        user_id: UserId,
        token_hash: String,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token_id,
            user_id,
            token_hash,
            issued_at,
            expires_at,
            revoked: false,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && !self.is_expired(now)
    }

    /// Irreversible
    pub fn revoke(&mut self) {
        self.revoked = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_in: Duration) -> RefreshTokenRecord {
        let now = Utc::now();
        RefreshTokenRecord::new(
            RefreshTokenId::new(),
            UserId::new(),
            "ab".repeat(32),
            now,
            now + expires_in,
        )
    }

    #[test]
    fn test_new_record_is_active() {
        let r = record(Duration::hours(1));
        assert!(!r.revoked);
        assert!(r.is_active(Utc::now()));
    }

    #[test]
    fn test_revoked_or_expired_is_inactive() {
        let mut r = record(Duration::hours(1));
        r.revoke();
        assert!(!r.is_active(Utc::now()));

        let expired = record(Duration::seconds(-1));
        assert!(expired.is_expired(Utc::now()));
        assert!(!expired.is_active(Utc::now()));
    }
}

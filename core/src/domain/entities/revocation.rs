//! Revocation entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex SHA-256 of a token. Stores key on this, never on the raw token.
pub fn fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// A token recorded as invalid before its natural expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    /// [`fingerprint`] of the revoked token
    pub fingerprint: String,

    /// When the token would have expired on its own
    pub expires_at: DateTime<Utc>,
}

impl RevocationEntry {
    pub fn new(token: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            fingerprint: fingerprint(token),
            expires_at,
        }
    }

    /// Once the token is past its expiry the entry carries no information
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

//! Revocation store trait defining how revoked tokens are recorded.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::StoreError;

/// Records tokens that must no longer be honored.
///
/// Implementations key entries on [`fingerprint`](crate::domain::fingerprint)
/// of the token and keep each entry at least until the token's own expiry.
/// Every method must be safe to call from concurrent requests.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record `token` as revoked until `expires_at`
    ///
    /// # Returns
    /// * `Ok(true)` - The token was not revoked before this call
    /// * `Ok(false)` - The token was already revoked
    /// * `Err(StoreError)` - The backend could not be reached
    ///
    /// The check and the insert are a single atomic step, so of two
    /// concurrent callers exactly one sees `true`.
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError>;

    /// Whether `token` has been revoked
    async fn is_revoked(&self, token: &str) -> Result<bool, StoreError>;

    /// Remove every entry, returning how many were removed
    async fn clear(&self) -> Result<usize, StoreError>;

    /// Remove entries whose token expired at or before `now`
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError>;

    /// Number of entries currently held
    async fn len(&self) -> Result<usize, StoreError>;

    async fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len().await? == 0)
    }

    /// Cheap reachability check that does not depend on the entry count
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name for logs and health checks
    fn backend_name(&self) -> &'static str;
}

#[async_trait]
impl<T: RevocationStore + ?Sized> RevocationStore for Arc<T> {
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        (**self).revoke(token, expires_at).await
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, StoreError> {
        (**self).is_revoked(token).await
    }

    async fn clear(&self) -> Result<usize, StoreError> {
        (**self).clear().await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        (**self).purge_expired(now).await
    }

    async fn len(&self) -> Result<usize, StoreError> {
        (**self).len().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

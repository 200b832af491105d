//! Redis-backed revocation store
//!
//! Every revoked token becomes one key `<prefix>:revoked:<sha256>` whose
//! Redis TTL is the token's remaining lifetime. Redis evicts the key when
//! the token would have expired anyway, so no sweep is needed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_core::domain::fingerprint;
use quill_core::errors::StoreError;
use quill_core::{Clock, RevocationStore, SystemClock};
use tracing::{debug, info};

use crate::cache::RedisClient;

/// Namespace under the configured key prefix
const NAMESPACE: &str = "revoked";

/// Revocation store shared by every instance using the same Redis server
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
    clock: Arc<dyn Clock>,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient) -> Self {
        Self::with_clock(client, Arc::new(SystemClock))
    }

    pub fn with_clock(client: RedisClient, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    fn key(&self, token: &str) -> String {
        entry_key(|key| self.client.config().make_key(key), token)
    }

    fn pattern(&self) -> String {
        self.client.config().make_key(&format!("{}:*", NAMESPACE))
    }
}

/// Key for `token`, built without the raw token ever reaching Redis
pub(crate) fn entry_key(make_key: impl Fn(&str) -> String, token: &str) -> String {
    make_key(&format!("{}:{}", NAMESPACE, fingerprint(token)))
}

/// Seconds until `expires_at`, never less than one so a racing revoke
/// still observes the entry
pub(crate) fn ttl_seconds(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let remaining = (expires_at - now).num_seconds();
    u64::try_from(remaining).unwrap_or(0).max(1)
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        let ttl = ttl_seconds(expires_at, self.clock.now());
        let created = self.client.set_nx_with_expiry(&self.key(token), "1", ttl).await?;
        debug!(created, ttl, "recorded revocation in Redis");
        Ok(created)
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, StoreError> {
        Ok(self.client.exists(&self.key(token)).await?)
    }

    async fn clear(&self) -> Result<usize, StoreError> {
        let keys = self.client.scan_keys(&self.pattern()).await?;
        let removed = self.client.delete_many(&keys).await?;
        info!(removed, "cleared Redis revocation entries");
        Ok(removed)
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, StoreError> {
        // Redis expires entries on its own
        Ok(0)
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.client.scan_keys(&self.pattern()).await?.len())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.client.health_check().await? {
            Ok(())
        } else {
            Err(StoreError::backend("unexpected PING response"))
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

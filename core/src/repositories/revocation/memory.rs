//! Process-local revocation store.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::revocation::{fingerprint, RevocationEntry};
use crate::errors::StoreError;

use super::r#trait::RevocationStore;

/// In-memory revocation store.
///
/// Revocations live only in this process: another instance of the service
/// will still accept a token revoked here. Use the Redis store when more
/// than one instance serves traffic.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    entries: RwLock<HashMap<String, RevocationEntry>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current entries, in no particular order
    pub async fn entries(&self) -> Vec<RevocationEntry> {
        self.entries.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        let entry = RevocationEntry::new(token, expires_at);
        let mut entries = self.entries.write().await;
        match entries.entry(entry.fingerprint.clone()) {
            Entry::Occupied(mut existing) => {
                let existing = existing.get_mut();
                if existing.expires_at < expires_at {
                    existing.expires_at = expires_at;
                }
                Ok(false)
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(true)
            }
        }
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.contains_key(&fingerprint(token)))
    }

    async fn clear(&self) -> Result<usize, StoreError> {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();
        debug!(removed, remaining = entries.len(), "purged expired revocations");
        Ok(removed)
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.entries.read().await.len())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

//! Shared fixtures for token service tests

mod sweeper_tests;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_shared::JwtConfig;

use crate::clock::ManualClock;
use crate::errors::StoreError;
use crate::repositories::{InMemoryRevocationStore, RevocationStore};
use crate::services::token::{TokenService, TokenServiceConfig};

pub(super) const ACCESS_SECRET: &str = "access-secret-for-tests-0123456789abcdef";
pub(super) const REFRESH_SECRET: &str = "refresh-secret-for-tests-0123456789abcdef";

pub(super) fn jwt_config() -> JwtConfig {
    JwtConfig::new(ACCESS_SECRET, REFRESH_SECRET)
}

pub(super) fn service_config(jwt: &JwtConfig) -> TokenServiceConfig {
    TokenServiceConfig::from_jwt_config(jwt).unwrap()
}

pub(super) type TestService = TokenService<Arc<InMemoryRevocationStore>>;

/// Service on a manual clock with an inspectable in-memory store
pub(super) fn test_service() -> (TestService, Arc<InMemoryRevocationStore>, Arc<ManualClock>) {
    test_service_with(&jwt_config())
}

pub(super) fn test_service_with(
    jwt: &JwtConfig,
) -> (TestService, Arc<InMemoryRevocationStore>, Arc<ManualClock>) {
    let store = Arc::new(InMemoryRevocationStore::new());
    let clock = Arc::new(ManualClock::starting_now());
    let service = TokenService::with_clock(service_config(jwt), store.clone(), clock.clone());
    (service, store, clock)
}

/// Store whose lookups or writes can be made to fail
pub(super) struct FlakyStore {
    inner: InMemoryRevocationStore,
    fail_lookups: bool,
    writes_allowed: Option<usize>,
    writes: AtomicUsize,
}

impl FlakyStore {
    pub(super) fn failing_lookups() -> Self {
        Self {
            inner: InMemoryRevocationStore::new(),
            fail_lookups: true,
            writes_allowed: None,
            writes: AtomicUsize::new(0),
        }
    }

    pub(super) fn failing_writes() -> Self {
        Self::failing_after_writes(0)
    }

    /// Accepts `allowed` writes, then fails every later one
    pub(super) fn failing_after_writes(allowed: usize) -> Self {
        Self {
            inner: InMemoryRevocationStore::new(),
            fail_lookups: false,
            writes_allowed: Some(allowed),
            writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RevocationStore for FlakyStore {
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        let attempt = self.writes.fetch_add(1, Ordering::SeqCst);
        if self.writes_allowed.is_some_and(|allowed| attempt >= allowed) {
            return Err(StoreError::backend("connection refused"));
        }
        self.inner.revoke(token, expires_at).await
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, StoreError> {
        if self.fail_lookups {
            return Err(StoreError::backend("connection refused"));
        }
        self.inner.is_revoked(token).await
    }

    async fn clear(&self) -> Result<usize, StoreError> {
        self.inner.clear().await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        self.inner.purge_expired(now).await
    }

    async fn len(&self) -> Result<usize, StoreError> {
        self.inner.len().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}

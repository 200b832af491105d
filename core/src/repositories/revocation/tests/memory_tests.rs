//! Tests for the in-memory revocation store

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::fingerprint;
use crate::repositories::{InMemoryRevocationStore, RevocationStore};

#[tokio::test]
async fn test_revoke_then_lookup() {
    let store = InMemoryRevocationStore::new();
    let expires_at = Utc::now() + Duration::days(30);

    assert!(!store.is_revoked("t1").await.unwrap());
    assert!(store.revoke("t1", expires_at).await.unwrap());
    assert!(store.is_revoked("t1").await.unwrap());
    assert!(!store.is_revoked("t2").await.unwrap());
    assert_eq!(store.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_second_revoke_reports_already_revoked() {
    let store = InMemoryRevocationStore::new();
    let expires_at = Utc::now() + Duration::days(30);

    assert!(store.revoke("t1", expires_at).await.unwrap());
    assert!(!store.revoke("t1", expires_at).await.unwrap());
    assert_eq!(store.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_clear_forgets_every_revocation() {
    let store = InMemoryRevocationStore::new();
    let expires_at = Utc::now() + Duration::days(30);
    for token in ["a", "b", "c"] {
        store.revoke(token, expires_at).await.unwrap();
    }

    assert_eq!(store.clear().await.unwrap(), 3);
    for token in ["a", "b", "c"] {
        assert!(!store.is_revoked(token).await.unwrap());
    }
    assert!(store.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_purge_removes_only_expired_entries() {
    let store = InMemoryRevocationStore::new();
    let now = Utc::now();
    store.revoke("expired", now - Duration::minutes(1)).await.unwrap();
    store.revoke("boundary", now).await.unwrap();
    store.revoke("live", now + Duration::hours(1)).await.unwrap();

    assert_eq!(store.purge_expired(now).await.unwrap(), 2);
    assert!(store.is_revoked("live").await.unwrap());
    assert!(!store.is_revoked("expired").await.unwrap());
    assert!(!store.is_revoked("boundary").await.unwrap());
}

#[tokio::test]
async fn test_re_revoke_extends_expiry() {
    let store = InMemoryRevocationStore::new();
    let now = Utc::now();
    store.revoke("t", now + Duration::minutes(1)).await.unwrap();
    store.revoke("t", now + Duration::hours(1)).await.unwrap();

    assert_eq!(store.purge_expired(now + Duration::minutes(30)).await.unwrap(), 0);
    assert!(store.is_revoked("t").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_revoke_has_single_winner() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let expires_at = Utc::now() + Duration::days(1);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.revoke("contested", expires_at).await.unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_arc_dyn_store_delegates() {
    let store: Arc<dyn RevocationStore> = Arc::new(InMemoryRevocationStore::new());
    assert_eq!(store.backend_name(), "memory");
    assert!(store.revoke("t", Utc::now() + Duration::days(1)).await.unwrap());
    assert!(store.is_revoked("t").await.unwrap());
    store.ping().await.unwrap();
}

#[tokio::test]
async fn test_entries_hold_fingerprints_only() {
    let store = InMemoryRevocationStore::new();
    let expires_at = Utc::now() + Duration::days(1);
    store.revoke("header.payload.signature", expires_at).await.unwrap();

    let entries = store.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].fingerprint, fingerprint("header.payload.signature"));
    assert_eq!(entries[0].expires_at, expires_at);
}

//! Unit tests for the Redis revocation store helpers

use chrono::{Duration, Utc};
use quill_core::domain::fingerprint;
use quill_shared::CacheConfig;

use super::redis_store::{entry_key, ttl_seconds};

#[test]
fn test_entry_key_uses_fingerprint_under_prefix() {
    let config = CacheConfig::new("redis://127.0.0.1:6379");
    let key = entry_key(|k| config.make_key(k), "header.payload.signature");

    assert_eq!(
        key,
        format!("quill:revoked:{}", fingerprint("header.payload.signature"))
    );
    assert!(!key.contains("payload"));
}

#[test]
fn test_entry_key_without_prefix() {
    let config = CacheConfig {
        key_prefix: None,
        ..CacheConfig::default()
    };
    let key = entry_key(|k| config.make_key(k), "t1");
    assert_eq!(key, format!("revoked:{}", fingerprint("t1")));
}

#[test]
fn test_ttl_follows_token_expiry() {
    let now = Utc::now();
    assert_eq!(ttl_seconds(now + Duration::days(30), now), 30 * 24 * 3600);
    assert_eq!(ttl_seconds(now + Duration::seconds(1), now), 1);
}

#[test]
fn test_ttl_never_drops_to_zero() {
    let now = Utc::now();
    assert_eq!(ttl_seconds(now, now), 1);
    assert_eq!(ttl_seconds(now - Duration::hours(1), now), 1);
}

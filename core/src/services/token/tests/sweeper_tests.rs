//! Unit tests for the revocation sweeper

use std::sync::Arc;

use chrono::Duration;
use quill_shared::{RevocationConfig, SweepPolicyKind};

use super::*;
use crate::clock::Clock;
use crate::services::token::{RevocationSweeper, SweepPolicy, SweeperConfig};

fn sweeper(
    store: Arc<InMemoryRevocationStore>,
    policy: SweepPolicy,
    clock: Arc<ManualClock>,
) -> RevocationSweeper<Arc<InMemoryRevocationStore>> {
    let config = SweeperConfig {
        policy,
        ..SweeperConfig::default()
    };
    RevocationSweeper::with_clock(store, config, clock)
}

#[tokio::test]
async fn test_legacy_policy_clears_oversized_store() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let clock = Arc::new(ManualClock::starting_now());
    let far_future = clock.now() + Duration::days(30);
    for i in 0..1001 {
        store.revoke(&format!("token-{i}"), far_future).await.unwrap();
    }

    let report = sweeper(
        store.clone(),
        SweepPolicy::ClearWhenOversized { threshold: 1000 },
        clock,
    )
    .run_once()
    .await
    .unwrap();

    assert_eq!(report.entries_before, 1001);
    assert_eq!(report.removed, 1001);
    assert_eq!(report.remaining(), 0);
    assert!(store.is_empty().await.unwrap());
    assert!(!store.is_revoked("token-0").await.unwrap());
}

#[tokio::test]
async fn test_legacy_policy_keeps_store_at_threshold() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let clock = Arc::new(ManualClock::starting_now());
    let far_future = clock.now() + Duration::days(30);
    for i in 0..1000 {
        store.revoke(&format!("token-{i}"), far_future).await.unwrap();
    }

    let report = sweeper(
        store.clone(),
        SweepPolicy::ClearWhenOversized { threshold: 1000 },
        clock,
    )
    .run_once()
    .await
    .unwrap();

    assert_eq!(report.removed, 0);
    assert_eq!(store.len().await.unwrap(), 1000);
}

#[tokio::test]
async fn test_default_policy_evicts_only_expired_entries() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let clock = Arc::new(ManualClock::starting_now());
    let now = clock.now();

    for i in 0..3 {
        store.revoke(&format!("expired-{i}"), now - Duration::minutes(1)).await.unwrap();
    }
    for i in 0..1001 {
        store.revoke(&format!("live-{i}"), now + Duration::days(1)).await.unwrap();
    }

    let report = sweeper(store.clone(), SweepPolicy::default(), clock)
        .run_once()
        .await
        .unwrap();

    assert_eq!(report.policy, SweepPolicy::ExpiredOnly);
    assert_eq!(report.removed, 3);
    assert_eq!(report.remaining(), 1001);
    assert!(store.is_revoked("live-0").await.unwrap());
    assert!(!store.is_revoked("expired-0").await.unwrap());
}

#[test]
fn test_policy_from_config() {
    let mut config = RevocationConfig::default();
    assert_eq!(SweepPolicy::from(&config), SweepPolicy::ExpiredOnly);

    config.policy = SweepPolicyKind::ClearWhenOversized;
    config.max_entries = 250;
    let sweeper_config = SweeperConfig::from(&config);
    assert_eq!(
        sweeper_config.policy,
        SweepPolicy::ClearWhenOversized { threshold: 250 }
    );
    assert_eq!(sweeper_config.interval, std::time::Duration::from_secs(3600));
    assert!(sweeper_config.enabled);
}

#[tokio::test(start_paused = true)]
async fn test_open_sweeps_on_interval_until_closed() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let clock = Arc::new(ManualClock::starting_now());
    store
        .revoke("stale", clock.now() - Duration::seconds(1))
        .await
        .unwrap();
    store
        .revoke("live", clock.now() + Duration::days(1))
        .await
        .unwrap();

    let config = SweeperConfig {
        interval: std::time::Duration::from_secs(60),
        ..SweeperConfig::default()
    };
    let handle = RevocationSweeper::with_clock(store.clone(), config, clock).open();
    assert!(handle.is_running());

    // Nothing happens before the first interval elapses
    tokio::time::sleep(std::time::Duration::from_secs(30)).await;
    assert_eq!(store.len().await.unwrap(), 2);

    tokio::time::sleep(std::time::Duration::from_secs(31)).await;
    for _ in 0..10 {
        if store.len().await.unwrap() == 1 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(store.len().await.unwrap(), 1);
    assert!(store.is_revoked("live").await.unwrap());

    handle.close().await;
}

#[tokio::test]
async fn test_disabled_sweeper_does_not_start() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let config = SweeperConfig {
        enabled: false,
        ..SweeperConfig::default()
    };

    let handle = RevocationSweeper::new(store, config).open();
    assert!(!handle.is_running());
    handle.close().await;
}

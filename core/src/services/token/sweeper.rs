//! Background sweeper keeping the revocation store bounded
//!
//! The sweeper runs on a single tokio task. Each tick applies a
//! [`SweepPolicy`] to the store; ticks that fall behind are skipped, so two
//! sweeps never run at the same time.

use std::sync::Arc;
use std::time::Duration;

use quill_shared::{RevocationConfig, SweepPolicyKind};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::errors::StoreError;
use crate::repositories::RevocationStore;

/// What a sweep removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepPolicy {
    /// Remove entries whose token has expired
    #[default]
    ExpiredOnly,
    /// Remove every entry once the store holds more than `threshold`.
    ///
    /// Kept for compatibility with deployments relying on a hard size cap.
    /// Clearing the store un-revokes tokens that are still valid.
    ClearWhenOversized { threshold: usize },
}

impl From<&RevocationConfig> for SweepPolicy {
    fn from(config: &RevocationConfig) -> Self {
        match config.policy {
            SweepPolicyKind::ExpiredOnly => SweepPolicy::ExpiredOnly,
            SweepPolicyKind::ClearWhenOversized => SweepPolicy::ClearWhenOversized {
                threshold: config.max_entries,
            },
        }
    }
}

/// Configuration for the revocation sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Time between two sweeps
    pub interval: Duration,
    pub policy: SweepPolicy,
    /// Whether `open` starts a background task at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
            policy: SweepPolicy::ExpiredOnly,
            enabled: true,
        }
    }
}

impl From<&RevocationConfig> for SweeperConfig {
    fn from(config: &RevocationConfig) -> Self {
        Self {
            interval: config.sweep_interval,
            policy: SweepPolicy::from(config),
            enabled: true,
        }
    }
}

/// Outcome of a single sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub policy: SweepPolicy,
    /// Entries held when the sweep started
    pub entries_before: usize,
    pub removed: usize,
}

impl SweepReport {
    pub fn remaining(&self) -> usize {
        self.entries_before.saturating_sub(self.removed)
    }
}

/// Applies a [`SweepPolicy`] to a revocation store
pub struct RevocationSweeper<S: RevocationStore> {
    store: S,
    config: SweeperConfig,
    clock: Arc<dyn Clock>,
}

impl<S: RevocationStore + 'static> RevocationSweeper<S> {
    pub fn new(store: S, config: SweeperConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, config: SweeperConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &SweeperConfig {
        &self.config
    }

    /// Run a single sweep
    pub async fn run_once(&self) -> Result<SweepReport, StoreError> {
        let entries_before = self.store.len().await?;

        let removed = match self.config.policy {
            SweepPolicy::ExpiredOnly => self.store.purge_expired(self.clock.now()).await?,
            SweepPolicy::ClearWhenOversized { threshold } if entries_before > threshold => {
                warn!(
                    entries = entries_before,
                    threshold, "revocation store oversized, clearing every entry"
                );
                self.store.clear().await?
            }
            SweepPolicy::ClearWhenOversized { .. } => 0,
        };

        Ok(SweepReport {
            policy: self.config.policy,
            entries_before,
            removed,
        })
    }

    /// Start sweeping on a background task
    ///
    /// Must be called inside a tokio runtime. The first sweep runs one
    /// interval after opening. Dropping the returned handle also stops the
    /// task, but only [`SweeperHandle::close`] waits for it to finish.
    pub fn open(self) -> SweeperHandle {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        if !self.config.enabled || self.config.interval.is_zero() {
            warn!("revocation sweeper is disabled");
            return SweeperHandle {
                shutdown,
                task: None,
            };
        }

        let period = self.config.interval;
        let task = tokio::spawn(async move {
            info!(
                backend = self.store.backend_name(),
                policy = ?self.config.policy,
                interval_secs = period.as_secs(),
                "revocation sweeper started"
            );

            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => match self.run_once().await {
                        Ok(report) if report.removed > 0 => info!(
                            removed = report.removed,
                            remaining = report.remaining(),
                            "revocation sweep completed"
                        ),
                        Ok(_) => debug!("revocation sweep found nothing to remove"),
                        Err(e) => error!(error = %e, "revocation sweep failed"),
                    },
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("revocation sweeper stopped");
        });

        SweeperHandle {
            shutdown,
            task: Some(task),
        }
    }
}

/// Handle to a running sweeper
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the sweeper and wait for an in-flight sweep to finish
    pub async fn close(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "revocation sweeper task ended abnormally");
            }
        }
    }
}

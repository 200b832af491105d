//! Revocation store and sweeper configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Where revoked tokens are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// Process-local map; revocations are not shared between instances
    Memory,
    /// Redis keys with TTL; shared by every instance using the same server
    Redis,
}

/// How the periodic sweep bounds the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepPolicyKind {
    /// Evict only entries whose token has expired
    ExpiredOnly,
    /// Drop every entry once the store grows past `max_entries`.
    /// This can un-revoke tokens that are still valid.
    ClearWhenOversized,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    pub backend: RevocationBackend,

    /// Time between two sweeps
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,

    pub policy: SweepPolicyKind,

    /// Size threshold used by `ClearWhenOversized`
    pub max_entries: usize,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            backend: RevocationBackend::Memory,
            sweep_interval: Duration::from_secs(3600),
            policy: SweepPolicyKind::ExpiredOnly,
            max_entries: 1000,
        }
    }
}

impl RevocationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "revocation.sweep_interval",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.policy == SweepPolicyKind::ClearWhenOversized && self.max_entries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "revocation.max_entries",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

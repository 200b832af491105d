//! Configuration for the token service

use chrono::Duration;
use quill_shared::{ConfigError, JwtConfig};

/// Validated signing configuration.
///
/// Only obtainable from a [`JwtConfig`] that passed validation, so a
/// service can never be built with a missing or shared secret.
#[derive(Clone)]
pub struct TokenServiceConfig {
    pub(crate) access_secret: Vec<u8>,
    pub(crate) refresh_secret: Vec<u8>,
    pub(crate) access_ttl: Duration,
    pub(crate) refresh_ttl: Duration,
    pub(crate) issuer: String,
    pub(crate) audience: String,
    pub(crate) leeway_seconds: i64,
}

impl TokenServiceConfig {
    pub fn from_jwt_config(config: &JwtConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            access_secret: config.access.secret.as_bytes().to_vec(),
            refresh_secret: config.refresh.secret.as_bytes().to_vec(),
            access_ttl: to_chrono(config.access.expiry, "jwt.access.expiry")?,
            refresh_ttl: to_chrono(config.refresh.expiry, "jwt.refresh.expiry")?,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            leeway_seconds: to_chrono(config.leeway, "jwt.leeway")?.num_seconds(),
        })
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = ConfigError;

    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        Self::from_jwt_config(config)
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

fn to_chrono(value: std::time::Duration, field: &'static str) -> Result<Duration, ConfigError> {
    Duration::from_std(value).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })
}

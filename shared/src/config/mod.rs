//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token secrets, lifetimes, issuer and audience
//! - `cache` - Redis connection settings
//! - `environment` - environment detection and logging configuration
//! - `revocation` - revocation backend and sweep policy
//! - `server` - HTTP server settings
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `QUILL__SECTION__KEY` environment variables.

pub mod auth;
pub mod cache;
pub mod environment;
pub mod revocation;
pub mod server;

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};

pub use crate::errors::ConfigError;
pub use auth::{JwtConfig, TokenPolicyConfig, MAX_EXPIRY, MAX_LEEWAY, MIN_SECRET_LEN};
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use revocation::{RevocationBackend, RevocationConfig, SweepPolicyKind};
pub use server::ServerConfig;

/// Config file read when `QUILL_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "config/quill.toml";

/// Prefix of environment overrides, e.g. `QUILL__JWT__ACCESS__SECRET`
pub const ENV_PREFIX: &str = "QUILL";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub revocation: RevocationConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            jwt: JwtConfig::default(),
            revocation: RevocationConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration for the running process.
    ///
    /// Reads `.env` first, then the file named by `QUILL_CONFIG` (or
    /// [`DEFAULT_CONFIG_PATH`] when present), then environment overrides.
    /// Fails when the result does not validate; there is no fallback secret.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path = std::env::var("QUILL_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self::load_from(Some(&path))
    }

    /// Load from an optional file plus environment overrides
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Load from a TOML document layered over the defaults. No environment
    /// overrides are applied.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?.add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Validate every section that can make startup unsafe
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        self.revocation.validate()?;
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port",
                reason: "must not be zero".to_string(),
            });
        }
        Ok(())
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder().add_source(Config::try_from(&LayeredConfig::default())?))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let layered: LayeredConfig = builder.build()?.try_deserialize()?;
        let config = layered.resolve();
        config.validate()?;
        Ok(config)
    }
}

/// Shape read from the config sources. Logging has no built-in default
/// here: it follows the loaded `environment` unless set explicitly.
#[derive(Debug, Default, Deserialize, Serialize)]
struct LayeredConfig {
    environment: Environment,
    server: ServerConfig,
    jwt: JwtConfig,
    revocation: RevocationConfig,
    cache: CacheConfig,
    #[serde(default)]
    logging: LoggingOverrides,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct LoggingOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<LogFormat>,
}

impl LayeredConfig {
    fn resolve(self) -> AppConfig {
        let mut logging = LoggingConfig::for_environment(self.environment);
        if let Some(level) = self.logging.level {
            logging.level = level;
        }
        if let Some(format) = self.logging.format {
            logging.format = format;
        }

        AppConfig {
            environment: self.environment,
            server: self.server,
            jwt: self.jwt,
            revocation: self.revocation,
            cache: self.cache,
            logging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const VALID: &str = r#"
        environment = "production"

        [jwt.access]
        secret = "access-secret-access-secret-access-secret"
        expiry = "15m"

        [jwt.refresh]
        secret = "refresh-secret-refresh-secret-refresh-secret"
        expiry = "30d"

        [revocation]
        backend = "redis"
        policy = "clear_when_oversized"
        sweep_interval = "10m"
    "#;

    #[test]
    fn test_toml_layered_over_defaults() {
        let config = AppConfig::from_toml_str(VALID).unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.jwt.access.expiry, Duration::from_secs(15 * 60));
        assert_eq!(config.jwt.refresh.expiry, Duration::from_secs(30 * 86400));
        assert_eq!(config.revocation.backend, RevocationBackend::Redis);
        assert_eq!(config.revocation.policy, SweepPolicyKind::ClearWhenOversized);
        assert_eq!(config.revocation.sweep_interval, Duration::from_secs(600));
        // untouched sections keep their defaults
        assert_eq!(config.revocation.max_entries, 1000);
        assert_eq!(config.jwt.issuer, "quill-blog");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_missing_secrets_abort_loading() {
        let result = AppConfig::from_toml_str("[server]\nport = 9000\n");
        assert!(matches!(result, Err(ConfigError::MissingSecret { kind: "access" })));
    }

    #[test]
    fn test_logging_follows_loaded_environment() {
        let config = AppConfig::from_toml_str(VALID).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);

        let with_level = format!("{VALID}\n[logging]\nlevel = \"warn\"\n");
        let config = AppConfig::from_toml_str(&with_level).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_oversized_expiry_aborts_loading() {
        let toml = r#"
            [jwt.access]
            secret = "access-secret-access-secret-access-secret"
            expiry = "1000000years"

            [jwt.refresh]
            secret = "refresh-secret-refresh-secret-refresh-secret"
            expiry = "1000000years"
        "#;
        let result = AppConfig::from_toml_str(toml);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "jwt.access.expiry", .. })
        ));
    }

    #[test]
    fn test_malformed_document_is_a_load_error() {
        let result = AppConfig::from_toml_str("[jwt.access]\nexpiry = \"soon\"\n");
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}

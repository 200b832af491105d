//! Shared configuration and common types for the Quill server
//!
//! This crate provides functionality used across all server crates:
//! - Layered configuration (defaults, TOML file, environment)
//! - Configuration validation errors
//! - Error and health response structures

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, Environment, JwtConfig, LogFormat, LoggingConfig,
    RevocationBackend, RevocationConfig, ServerConfig, SweepPolicyKind, TokenPolicyConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, HealthStatus};

//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors. Every variant is fatal: the process must not start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("{kind} token secret is not configured")]
    MissingSecret { kind: &'static str },

    #[error("{kind} token secret must be at least {min} bytes")]
    SecretTooShort { kind: &'static str, min: usize },

    #[error("access and refresh tokens must be signed with different secrets")]
    SharedSecret,

    #[error("{kind} token expiry must be greater than zero")]
    ZeroExpiry { kind: &'static str },

    #[error("access token expiry must not exceed refresh token expiry")]
    AccessOutlivesRefresh,

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Error codes returned to clients. The failing check is logged, never sent.
pub mod error_codes {
    pub const UNAUTHENTICATED: &str = "unauthenticated";
    pub const REAUTHENTICATE: &str = "reauthenticate";
    pub const BAD_REQUEST: &str = "bad_request";
    pub const NOT_FOUND: &str = "not_found";
    pub const SERVICE_UNAVAILABLE: &str = "service_unavailable";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

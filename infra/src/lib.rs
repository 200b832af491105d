//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `quill_core` that need
//! an external service. Currently that is Redis:
//!
//! - **Cache**: Redis client with connection retry and exponential backoff
//! - **Revocation**: a [`RevocationStore`](quill_core::RevocationStore)
//!   shared by every instance pointed at the same Redis server

use quill_core::errors::StoreError;

/// Cache module - Redis client and operations
pub mod cache;

/// Revocation module - Redis-backed revocation store
pub mod revocation;

pub use cache::RedisClient;
pub use revocation::RedisRevocationStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(error: InfrastructureError) -> Self {
        StoreError::backend(error.to_string())
    }
}

//! Cache module for Redis-based storage
//!
//! Provides the Redis client used by the revocation store, with connection
//! retry and the handful of commands the store needs.

pub mod redis_client;


pub use redis_client::RedisClient;

// Re-export commonly used types
pub use quill_shared::CacheConfig;

//! Revocation store implementations backed by external services

mod redis_store;

#[cfg(test)]
mod tests;

pub use redis_store::RedisRevocationStore;

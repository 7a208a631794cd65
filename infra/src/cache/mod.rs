//! Cache module for the revocation list
//!
//! Redis is the shared backend for multi-instance deployments; the
//! in-memory cache serves single-instance runs and tests.

pub mod memory;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use memory::InMemoryCache;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use af_shared::config::CacheConfig;

//! # Infrastructure Layer
//!
//! Concrete implementations of the persistence seams defined in `af_core`:
//!
//! - **Database**: MySQL user repository using SQLx, plus an in-memory one
//! - **Cache**: Redis client backing the revocation list, plus an in-memory one
//! - **Stores**: backend selection and start-up readiness retries

// Re-export core types for convenience
pub use af_core::errors::*;

/// Database module - user persistence
pub mod database;

/// Cache module - revocation list backends
pub mod cache;

/// Backend selection and start-up wiring
pub mod stores;

pub use cache::{InMemoryCache, RedisClient};
pub use database::{DatabasePool, InMemoryUserRepository, MySqlUserRepository};
pub use stores::{connect_stores, retry_with_backoff, RetryPolicy, RevocationCache, UserStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

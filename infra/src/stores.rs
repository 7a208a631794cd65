//! Backend selection and start-up wiring for the user store and revocation cache

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use af_core::domain::entities::user::User;
use af_core::errors::DomainError;
use af_core::repositories::UserRepository;
use af_core::services::revocation::KeyValueCache;
use af_shared::config::{AppConfig, StorageBackend};

use crate::cache::{InMemoryCache, RedisClient};
use crate::database::{DatabasePool, InMemoryUserRepository, MySqlUserRepository};
use crate::InfrastructureError;

/// User repository chosen at start-up
pub enum UserStore {
    MySql(MySqlUserRepository),
    Memory(InMemoryUserRepository),
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        match self {
            UserStore::MySql(repo) => repo.find_by_email(email).await,
            UserStore::Memory(repo) => repo.find_by_email(email).await,
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        match self {
            UserStore::MySql(repo) => repo.create(user).await,
            UserStore::Memory(repo) => repo.create(user).await,
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        match self {
            UserStore::MySql(repo) => repo.exists_by_email(email).await,
            UserStore::Memory(repo) => repo.exists_by_email(email).await,
        }
    }
}

/// Revocation cache chosen at start-up
pub enum RevocationCache {
    Redis(RedisClient),
    Memory(InMemoryCache),
}

#[async_trait]
impl KeyValueCache for RevocationCache {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        match self {
            RevocationCache::Redis(c) => KeyValueCache::set_with_expiry(c, key, value, ttl_seconds).await,
            RevocationCache::Memory(c) => c.set_with_expiry(key, value, ttl_seconds).await,
        }
    }

    async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<bool, String> {
        match self {
            RevocationCache::Redis(c) => {
                KeyValueCache::set_if_absent_with_expiry(c, key, value, ttl_seconds).await
            }
            RevocationCache::Memory(c) => c.set_if_absent_with_expiry(key, value, ttl_seconds).await,
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        match self {
            RevocationCache::Redis(c) => KeyValueCache::exists(c, key).await,
            RevocationCache::Memory(c) => c.exists(key).await,
        }
    }
}

/// Backoff schedule for waiting on a dependency at start-up
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

/// Run `operation` until it succeeds or the policy gives up
pub async fn retry_with_backoff<T, F, Fut>(
    name: &str,
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, InfrastructureError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, InfrastructureError>>,
{
    let mut attempts = 0;
    let mut delay = policy.initial_delay;

    loop {
        attempts += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempts < policy.max_attempts => {
                tracing::warn!(
                    "{} not ready (attempt {}/{}): {}. Retrying in {:?}...",
                    name,
                    attempts,
                    policy.max_attempts,
                    e,
                    delay
                );
                sleep(delay).await;
                delay = (delay * 2).min(policy.max_delay);
            }
            Err(e) => {
                tracing::error!("{} unavailable after {} attempts: {}", name, attempts, e);
                return Err(e);
            }
        }
    }
}

/// Connect the configured backends, waiting for them to come up
pub async fn connect_stores(
    config: &AppConfig,
    policy: RetryPolicy,
) -> Result<(UserStore, RevocationCache), InfrastructureError> {
    match config.cache.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; users and revocations are lost on restart");
            Ok((
                UserStore::Memory(InMemoryUserRepository::new()),
                RevocationCache::Memory(InMemoryCache::new()),
            ))
        }
        StorageBackend::Redis => {
            let pool = retry_with_backoff("Database", policy, || {
                DatabasePool::new(&config.database)
            })
            .await?;
            pool.run_migrations().await?;

            let redis = retry_with_backoff("Redis", policy, || RedisClient::new(config.cache.clone()))
                .await?;

            Ok((
                UserStore::MySql(MySqlUserRepository::new(pool.get_pool().clone())),
                RevocationCache::Redis(redis),
            ))
        }
    }
}

//! Backing key-value cache for the revocation list

use async_trait::async_trait;

/// Key-value cache with native per-key expiry
///
/// Each call is a single-key atomic operation. Errors are reported as
/// strings and translated by the caller.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Store `value` under `key`, replacing any previous value, expiring after `ttl_seconds`
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64)
        -> Result<(), String>;

    /// Store `value` only if `key` is absent; `Ok(false)` means it was already present
    async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<bool, String>;

    /// Whether `key` is present and not expired
    async fn exists(&self, key: &str) -> Result<bool, String>;
}

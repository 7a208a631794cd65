//! Revocation store implementation

use std::sync::Arc;

use crate::errors::{DomainError, DomainResult};

use super::traits::KeyValueCache;

/// Prefix of every revocation record key
pub const REVOCATION_KEY_PREFIX: &str = "blacklist:";

/// Value stored under a revocation key
pub const REVOKED_MARKER: &str = "revoked";

/// Denylist of token ids, one record per revoked `jti`
///
/// Records expire on their own; the TTL handed in by the caller is the
/// only thing that decides how long a record lives.
pub struct RevocationStore<C: KeyValueCache> {
    cache: Arc<C>,
}

impl<C: KeyValueCache> Clone for RevocationStore<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<C: KeyValueCache> RevocationStore<C> {
    pub fn new(cache: Arc<C>) -> Self {
        Self { cache }
    }

    /// Cache key for a token id
    pub fn key_for(jti: &str) -> String {
        format!("{}{}", REVOCATION_KEY_PREFIX, jti)
    }

    /// Revokes `jti` for `remaining_ttl` seconds
    ///
    /// A non-positive TTL means the token has already expired and nothing is
    /// written. Revoking twice simply overwrites the record.
    pub async fn revoke(&self, jti: &str, remaining_ttl: i64) -> DomainResult<()> {
        if remaining_ttl <= 0 {
            tracing::debug!(jti = %jti, "Token already expired, skipping revocation write");
            return Ok(());
        }

        self.cache
            .set_with_expiry(&Self::key_for(jti), REVOKED_MARKER, remaining_ttl as u64)
            .await
            .map_err(|e| store_unavailable("revoke", jti, e))?;

        tracing::info!(jti = %jti, ttl = remaining_ttl, "Token revoked");
        Ok(())
    }

    /// Atomically revokes `jti` unless a record already exists
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - This call created the record (or the token had already expired)
    /// * `Ok(false)` - The token was revoked before this call
    /// * `Err(DomainError::StoreUnavailable)` - The write could not be performed
    pub async fn revoke_if_absent(&self, jti: &str, remaining_ttl: i64) -> DomainResult<bool> {
        if remaining_ttl <= 0 {
            tracing::debug!(jti = %jti, "Token already expired, skipping revocation write");
            return Ok(true);
        }

        let created = self
            .cache
            .set_if_absent_with_expiry(&Self::key_for(jti), REVOKED_MARKER, remaining_ttl as u64)
            .await
            .map_err(|e| store_unavailable("revoke_if_absent", jti, e))?;

        if created {
            tracing::info!(jti = %jti, ttl = remaining_ttl, "Token revoked");
        } else {
            tracing::warn!(jti = %jti, "Token was already revoked");
        }
        Ok(created)
    }

    /// Whether a revocation record exists for `jti`
    pub async fn is_revoked(&self, jti: &str) -> DomainResult<bool> {
        self.cache
            .exists(&Self::key_for(jti))
            .await
            .map_err(|e| store_unavailable("is_revoked", jti, e))
    }
}

fn store_unavailable(operation: &str, jti: &str, cause: String) -> DomainError {
    tracing::error!(operation, jti = %jti, error = %cause, "Revocation store unavailable");
    DomainError::StoreUnavailable { message: cause }
}

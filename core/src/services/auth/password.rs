//! Password hashing with bcrypt
//!
//! bcrypt is CPU-bound; both operations run on the blocking thread pool.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::errors::{DomainError, DomainResult};

const REFERENCE_PASSWORD: &str = "reference-password";

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Hash checked against when there is no stored one, made on first use
    reference_hash: Arc<OnceCell<String>>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            reference_hash: Arc::new(OnceCell::new()),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes `password` with a fresh salt
    pub async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })
    }

    /// Checks `password` against a stored hash
    ///
    /// A hash that bcrypt cannot parse counts as a mismatch.
    pub async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        let result = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?;

        match result {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                Ok(false)
            }
        }
    }
}

impl PasswordHasher {
    /// Runs a full verification against a reference hash and discards the result
    ///
    /// Used when no account matches, so a lookup miss costs the same bcrypt
    /// work as a wrong password.
    pub async fn verify_without_hash(&self, password: &str) -> DomainResult<()> {
        let hash = self
            .reference_hash
            .get_or_try_init(|| self.hash(REFERENCE_PASSWORD))
            .await?;
        self.verify(password, hash).await?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn reference_hash(&self) -> Option<&str> {
        self.reference_hash.get().map(String::as_str)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("correct horse").await.unwrap();

        assert_ne!(hash, "correct horse");
        assert!(hasher.verify("correct horse", &hash).await.unwrap());
        assert!(!hasher.verify("battery staple", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_gets_different_salts() {
        let hasher = PasswordHasher::new(4);
        let a = hasher.hash("secret1").await.unwrap();
        let b = hasher.hash("secret1").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_verify_without_hash_pays_full_cost_once() {
        let hasher = PasswordHasher::new(5);
        assert!(hasher.reference_hash().is_none());

        hasher.verify_without_hash("anything").await.unwrap();
        let first = hasher.reference_hash().unwrap().to_string();
        assert!(first.starts_with("$2b$05$"));

        hasher.clone().verify_without_hash("other").await.unwrap();
        assert_eq!(hasher.reference_hash(), Some(first.as_str()));
    }

    #[tokio::test]
    async fn test_unparseable_hash_is_mismatch() {
        let hasher = PasswordHasher::new(4);
        assert!(!hasher.verify("secret1", "not-a-bcrypt-hash").await.unwrap());
    }
}

//! Throwaway keys and builders shared by unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use jsonwebtoken::Algorithm;

use crate::domain::entities::user::User;
use crate::services::revocation::KeyValueCache;
use crate::services::token::{KeyPair, TokenConfig, TokenFactory};

pub(crate) const RSA_PRIVATE_PEM: &str = include_str!("../tests/fixtures/rsa_private_key.pem");
pub(crate) const RSA_PUBLIC_PEM: &str = include_str!("../tests/fixtures/rsa_public_key.pem");
pub(crate) const RSA_OTHER_PRIVATE_PEM: &str =
    include_str!("../tests/fixtures/rsa_other_private_key.pem");
pub(crate) const EC_PRIVATE_PEM: &str = include_str!("../tests/fixtures/ec_private_key.pem");
pub(crate) const EC_PUBLIC_PEM: &str = include_str!("../tests/fixtures/ec_public_key.pem");

pub(crate) fn rsa_keys() -> KeyPair {
    KeyPair::from_pem_strings(Algorithm::RS256, RSA_PRIVATE_PEM, RSA_PUBLIC_PEM).unwrap()
}

pub(crate) fn factory() -> TokenFactory {
    TokenFactory::new(rsa_keys(), TokenConfig::default())
}

pub(crate) fn user(email: &str) -> User {
    User::new(email, "unused-hash")
}

/// In-memory cache double that records TTLs and can simulate outages
#[derive(Default)]
pub(crate) struct MockCache {
    pub(crate) entries: Mutex<HashMap<String, (String, u64)>>,
    pub(crate) fail_reads: AtomicBool,
    pub(crate) fail_writes: AtomicBool,
}

impl MockCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub(crate) fn set_failing(&self, reads: bool, writes: bool) {
        self.fail_reads.store(reads, Ordering::SeqCst);
        self.fail_writes.store(writes, Ordering::SeqCst);
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), String> {
        if flag.load(Ordering::SeqCst) {
            Err("connection refused".to_string())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueCache for MockCache {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.check(&self.fail_writes)?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<bool, String> {
        self.check(&self.fail_writes)?;
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), (value.to_string(), ttl_seconds));
        Ok(true)
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        self.check(&self.fail_reads)?;
        Ok(self.entries.lock().unwrap().contains_key(key))
    }
}

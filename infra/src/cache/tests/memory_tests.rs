//! Unit tests for the in-memory cache

use std::sync::Arc;

use af_core::services::revocation::{KeyValueCache, RevocationStore};

use crate::cache::InMemoryCache;

#[tokio::test]
async fn test_set_and_exists() {
    let cache = InMemoryCache::new();

    cache.set_with_expiry("k", "v", 60).await.unwrap();

    assert!(cache.exists("k").await.unwrap());
    assert!(!cache.exists("other").await.unwrap());
    assert_eq!(cache.get("k").await.as_deref(), Some("v"));
}

#[tokio::test]
async fn test_zero_ttl_is_never_visible() {
    let cache = InMemoryCache::new();

    cache.set_with_expiry("k", "v", 0).await.unwrap();

    assert!(!cache.exists("k").await.unwrap());
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_expired_key_can_be_set_again_if_absent() {
    let cache = InMemoryCache::new();

    assert!(cache.set_if_absent_with_expiry("k", "a", 0).await.unwrap());
    assert!(cache.set_if_absent_with_expiry("k", "b", 60).await.unwrap());
    assert!(!cache.set_if_absent_with_expiry("k", "c", 60).await.unwrap());
    assert_eq!(cache.get("k").await.as_deref(), Some("b"));
}

#[tokio::test]
async fn test_overwrite_replaces_value() {
    let cache = InMemoryCache::new();

    cache.set_with_expiry("k", "a", 60).await.unwrap();
    cache.set_with_expiry("k", "b", 60).await.unwrap();

    assert_eq!(cache.get("k").await.as_deref(), Some("b"));
    assert_eq!(cache.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_revoke_if_absent_single_winner() {
    let store = RevocationStore::new(Arc::new(InMemoryCache::new()));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.revoke_if_absent("jti", 60).await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
    assert!(store.is_revoked("jti").await.unwrap());
}

//! In-memory user repository for single-instance runs and tests

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use af_core::domain::entities::user::User;
use af_core::errors::{AuthError, DomainError};
use af_core::repositories::UserRepository;

/// User store keyed by normalized email; lost on restart
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(AuthError::UserAlreadyExists.into());
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.users.read().await.contains_key(email))
    }
}

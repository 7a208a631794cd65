//! Authentication route handlers
//!
//! - Registration
//! - Password login
//! - Token refresh (rotation)
//! - Logout

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use af_core::{AuthService, KeyValueCache, UserRepository};

/// Application state that holds shared services
pub struct AppState<U, C>
where
    U: UserRepository,
    C: KeyValueCache,
{
    pub auth_service: Arc<AuthService<U, C>>,
}

impl<U, C> AppState<U, C>
where
    U: UserRepository,
    C: KeyValueCache,
{
    pub fn new(auth_service: Arc<AuthService<U, C>>) -> Self {
        Self { auth_service }
    }
}

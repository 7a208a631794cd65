//! Authentication service module
//!
//! - Registration and administrator seeding
//! - Password login issuing access/refresh pairs
//! - Per-request access token validation
//! - Single-use refresh rotation
//! - Logout revoking both tokens

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::PasswordHasher;
pub use service::AuthService;

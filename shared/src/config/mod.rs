//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing, expiry windows, password hashing, admin seed
//! - `cache` - Revocation store backend and Redis connection
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `server` - HTTP server and CORS configuration
//!
//! Everything is read once at start-up and handed to constructors; nothing
//! here is consulted lazily at request time.

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use auth::{AuthConfig, FirstAdminConfig, JwtConfig};
pub use cache::{CacheConfig, StorageBackend};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is read first when present;
    /// variables already set in the environment win over the file.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            cors: CorsConfig::from_env(),
        }
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> Result<(), String> {
        self.auth.validate()?;

        if self.server.port == 0 {
            return Err("SERVER_PORT must be non-zero".to_string());
        }

        if self.cache.max_retries == 0 {
            return Err("REDIS_MAX_RETRIES must be at least 1".to_string());
        }

        Ok(())
    }
}

/// Read `key` from the environment, falling back to `default` when the
/// variable is missing or does not parse.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

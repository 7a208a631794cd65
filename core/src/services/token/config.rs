//! Expiry policy for issued tokens

use af_shared::config::JwtConfig;
use chrono::Duration;

use crate::domain::entities::token::TokenType;
use crate::errors::{DomainError, DomainResult};

/// One expiry window per token type
///
/// The signing algorithm is not part of the policy; it always comes from
/// the loaded [`KeyPair`](super::KeyPair).
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_expiry: Duration,
    pub refresh_expiry: Duration,
    pub verify_expiry: Duration,
    pub reset_password_expiry: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_expiry: Duration::minutes(15),
            refresh_expiry: Duration::days(7),
            verify_expiry: Duration::days(10),
            reset_password_expiry: Duration::minutes(60),
        }
    }
}

impl TokenConfig {
    /// Builds the policy from the externally loaded JWT configuration
    pub fn from_jwt_config(config: &JwtConfig) -> DomainResult<Self> {
        config
            .validate()
            .map_err(|message| DomainError::Validation { message })?;

        Ok(Self {
            access_expiry: Duration::minutes(config.access_token_expire_minutes),
            refresh_expiry: Duration::days(config.refresh_token_expire_days),
            verify_expiry: Duration::days(config.verify_token_expire_days),
            reset_password_expiry: Duration::minutes(config.resetpass_token_expire_minutes),
        })
    }

    /// Full validity window for a token type
    pub fn expiry_for(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.access_expiry,
            TokenType::Refresh => self.refresh_expiry,
            TokenType::Verify => self.verify_expiry,
            TokenType::ResetPassword => self.reset_password_expiry,
        }
    }

    /// Overrides the window for one token type
    pub fn with_expiry(mut self, token_type: TokenType, expiry: Duration) -> Self {
        match token_type {
            TokenType::Access => self.access_expiry = expiry,
            TokenType::Refresh => self.refresh_expiry = expiry,
            TokenType::Verify => self.verify_expiry = expiry,
            TokenType::ResetPassword => self.reset_password_expiry = expiry,
        }
        self
    }
}

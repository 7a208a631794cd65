//! Typed token issuance

use chrono::{Duration, Utc};

use crate::domain::entities::token::{TokenPair, TokenPayload, TokenType};
use crate::domain::entities::user::User;
use crate::errors::DomainResult;

use super::config::TokenConfig;
use super::key_manager::KeyPair;
use super::signer::JwtSigner;

/// Builds typed token payloads and hands them to the signer
///
/// Access tokens take the signer's default expiry; every other type passes
/// its configured window explicitly.
#[derive(Debug, Clone)]
pub struct TokenFactory {
    signer: JwtSigner,
    config: TokenConfig,
}

impl TokenFactory {
    /// Creates a factory whose signer defaults to the access window
    pub fn new(keys: KeyPair, config: TokenConfig) -> Self {
        let signer = JwtSigner::new(keys, config.access_expiry);
        Self { signer, config }
    }

    pub fn signer(&self) -> &JwtSigner {
        &self.signer
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Full configured lifetime of a token type
    pub fn window_for(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.signer.default_expiry(),
            other => self.config.expiry_for(other),
        }
    }

    /// Issues a token of `token_type` for `user`
    pub fn issue(&self, user: &User, token_type: TokenType) -> DomainResult<String> {
        self.issue_at(user, token_type, Utc::now().timestamp())
    }

    /// Issues a token as if at `now` (Unix seconds)
    pub fn issue_at(&self, user: &User, token_type: TokenType, now: i64) -> DomainResult<String> {
        let payload = TokenPayload::new(user.email.clone(), user.id, token_type);
        let expires_in = match token_type {
            TokenType::Access => None,
            other => Some(self.config.expiry_for(other)),
        };

        self.signer.sign_at(&payload, expires_in, now)
    }

    /// Issues a fresh access + refresh pair
    pub fn issue_pair(&self, user: &User) -> DomainResult<TokenPair> {
        self.issue_pair_at(user, Utc::now().timestamp())
    }

    pub fn issue_pair_at(&self, user: &User, now: i64) -> DomainResult<TokenPair> {
        let access_token = self.issue_at(user, TokenType::Access, now)?;
        let refresh_token = self.issue_at(user, TokenType::Refresh, now)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.signer.default_expiry().num_seconds(),
        ))
    }
}

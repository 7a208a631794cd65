//! Auth session service: login, request authentication, refresh rotation, logout

use std::sync::Arc;

use af_shared::utils::validation::{is_valid_email, is_valid_password, normalize_email};
use chrono::Utc;

use crate::domain::entities::token::{Claims, TokenPair, TokenType};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::UserRepository;
use crate::services::revocation::{KeyValueCache, RevocationStore};
use crate::services::token::TokenFactory;

use super::config::AuthServiceConfig;
use super::password::PasswordHasher;

/// Authentication service orchestrating the token lifecycle
///
/// A session is never stored: its state is the pair of token ids and
/// whatever the revocation store holds for them.
pub struct AuthService<U, C>
where
    U: UserRepository,
    C: KeyValueCache,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Typed token issuance and verification
    token_factory: Arc<TokenFactory>,
    /// Denylist of revoked token ids
    revocations: RevocationStore<C>,
    passwords: PasswordHasher,
}

impl<U, C> AuthService<U, C>
where
    U: UserRepository,
    C: KeyValueCache,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_factory` - Issues and verifies tokens
    /// * `cache` - Backing store for revocation records
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_factory: Arc<TokenFactory>,
        cache: Arc<C>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_factory,
            revocations: RevocationStore::new(cache),
            passwords: PasswordHasher::new(config.bcrypt_cost),
        }
    }

    pub fn token_factory(&self) -> &TokenFactory {
        &self.token_factory
    }

    #[cfg(test)]
    pub(crate) fn password_hasher(&self) -> &PasswordHasher {
        &self.passwords
    }

    /// Register a new account
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created, active, unverified user
    /// * `Err(DomainError::Validation)` - Bad email format or password length
    /// * `Err(AuthError::UserAlreadyExists)` - Email already registered
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = normalize_email(email);
        validate_credentials(&email, password)?;

        if self.user_repository.exists_by_email(&email).await? {
            tracing::info!("Registration rejected, email already in use");
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.passwords.hash(password).await?;
        let user = self
            .user_repository
            .create(User::new(email, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Create the administrator account unless the email is already taken
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Administrator created
    /// * `Ok(false)` - An account with that email already exists
    pub async fn ensure_admin(&self, email: &str, password: &str) -> DomainResult<bool> {
        let email = normalize_email(email);
        validate_credentials(&email, password)?;

        if self.user_repository.exists_by_email(&email).await? {
            tracing::debug!("Administrator account already present");
            return Ok(false);
        }

        let password_hash = self.passwords.hash(password).await?;
        let admin = self
            .user_repository
            .create(User::new_admin(email, password_hash))
            .await?;

        tracing::info!(user_id = %admin.id, "Administrator account created");
        Ok(true)
    }

    /// Authenticate with email and password and issue a fresh token pair
    ///
    /// Unknown email and wrong password fail identically. Earlier sessions of
    /// the same user stay valid.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let email = normalize_email(email);

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                self.passwords.verify_without_hash(password).await?;
                tracing::info!("Login failed");
                return Err(AuthError::AuthFailed.into());
            }
        };

        if !self.passwords.verify(password, &user.password_hash).await? {
            tracing::info!(user_id = %user.id, "Login failed");
            return Err(AuthError::AuthFailed.into());
        }

        if !user.is_active {
            tracing::info!(user_id = %user.id, "Login refused for inactive account");
            return Err(AuthError::InactiveAccount.into());
        }

        let pair = self.token_factory.issue_pair(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Validate the access token of an incoming request
    ///
    /// Checks signature and expiry, then the revocation list, then the token
    /// type. A revocation store outage rejects the request.
    pub async fn authenticate_request(&self, token: &str) -> DomainResult<Claims> {
        self.authenticate_request_at(token, Utc::now().timestamp()).await
    }

    pub async fn authenticate_request_at(&self, token: &str, now: i64) -> DomainResult<Claims> {
        let claims = self.token_factory.signer().verify_at(token, now)?;

        if self.revocations.is_revoked(&claims.jti).await? {
            tracing::debug!(jti = %claims.jti, "Rejected revoked token");
            return Err(TokenError::Revoked.into());
        }

        ensure_type(&claims, TokenType::Access)?;
        Ok(claims)
    }

    /// Resolve the authenticated principal to an active user
    pub async fn current_user(&self, claims: &Claims) -> DomainResult<User> {
        let user = self
            .user_repository
            .find_by_email(&claims.sub)
            .await?
            .filter(|user| user.id == claims.user_id)
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthError::InactiveAccount.into());
        }

        Ok(user)
    }

    /// Exchange a refresh token for a new pair, revoking the one presented
    ///
    /// A refresh token is single-use. The old id is revoked with a
    /// set-if-absent write before anything is issued; losing that race or
    /// failing the write fails the call.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        self.refresh_at(refresh_token, Utc::now().timestamp()).await
    }

    pub async fn refresh_at(&self, refresh_token: &str, now: i64) -> DomainResult<TokenPair> {
        let claims = self.token_factory.signer().verify_at(refresh_token, now)?;
        ensure_type(&claims, TokenType::Refresh)?;

        if self.revocations.is_revoked(&claims.jti).await? {
            tracing::warn!(jti = %claims.jti, "Revoked refresh token presented");
            return Err(TokenError::Revoked.into());
        }

        let user = self
            .user_repository
            .find_by_email(&claims.sub)
            .await?
            .filter(|user| user.id == claims.user_id && user.is_active)
            .ok_or(AuthError::InvalidUser)?;

        let remaining = claims.remaining_seconds(now);
        if !self.revocations.revoke_if_absent(&claims.jti, remaining).await? {
            tracing::warn!(jti = %claims.jti, "Concurrent refresh lost the race");
            return Err(TokenError::Revoked.into());
        }

        let pair = self.token_factory.issue_pair_at(&user, now)?;
        tracing::info!(user_id = %user.id, "Token pair rotated");
        Ok(pair)
    }

    /// Revoke both tokens of a session
    ///
    /// Each id is blocked for the full configured window of its type.
    pub async fn logout(&self, access_token: &str, refresh_token: &str) -> DomainResult<()> {
        self.logout_at(access_token, refresh_token, Utc::now().timestamp())
            .await
    }

    pub async fn logout_at(
        &self,
        access_token: &str,
        refresh_token: &str,
        now: i64,
    ) -> DomainResult<()> {
        let signer = self.token_factory.signer();
        let access = signer.verify_at(access_token, now)?;
        ensure_type(&access, TokenType::Access)?;
        let refresh = signer.verify_at(refresh_token, now)?;
        ensure_type(&refresh, TokenType::Refresh)?;

        if access.sub != refresh.sub || access.user_id != refresh.user_id {
            tracing::warn!(user_id = %access.user_id, "Logout with tokens of different users");
            return Err(TokenError::SubjectMismatch.into());
        }

        for claims in [&access, &refresh] {
            let window = self.token_factory.window_for(claims.token_type);
            self.revocations
                .revoke(&claims.jti, window.num_seconds())
                .await?;
        }

        tracing::info!(user_id = %access.user_id, "User logged out");
        Ok(())
    }
}

fn ensure_type(claims: &Claims, expected: TokenType) -> Result<(), TokenError> {
    if claims.token_type != expected {
        return Err(TokenError::WrongTokenType {
            expected,
            actual: claims.token_type,
        });
    }
    Ok(())
}

fn validate_credentials(email: &str, password: &str) -> DomainResult<()> {
    if !is_valid_email(email) {
        return Err(DomainError::Validation {
            message: "Invalid email address".to_string(),
        });
    }
    if !is_valid_password(password) {
        return Err(DomainError::Validation {
            message: "Password must be between 6 and 40 characters and at most 72 bytes"
                .to_string(),
        });
    }
    Ok(())
}

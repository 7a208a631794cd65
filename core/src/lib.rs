//! # AuthFlow Core
//!
//! Domain entities, repository interfaces, error types and the token
//! lifecycle engine: key pair, signer, typed token factory, revocation
//! store and the auth session service built on top of them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, TokenPair, TokenPayload, TokenType, User, UserRole, BEARER_TOKEN_TYPE,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::UserRepository;
pub use services::{
    AuthService, AuthServiceConfig, JwtSigner, KeyPair, KeyValueCache, RevocationStore,
    TokenConfig, TokenFactory,
};

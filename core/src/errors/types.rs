//! Error types for authentication and token handling
//!
//! Variants name the precise cause so services and logs can tell failures
//! apart. The presentation layer collapses them into uniform responses.

use thiserror::Error;

use crate::domain::entities::token::TokenType;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; deliberately one variant for both
    #[error("Authentication failed")]
    AuthFailed,

    #[error("Account is inactive")]
    InactiveAccount,

    /// Refresh subject is missing or disabled
    #[error("Invalid user")]
    InvalidUser,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not a parseable JWS or claims have the wrong shape
    #[error("Malformed token")]
    Malformed,

    /// Signature or algorithm does not match the configured public key
    #[error("Invalid token signature")]
    SignatureInvalid,

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Wrong token type: expected {expected}, got {actual}")]
    WrongTokenType {
        expected: TokenType,
        actual: TokenType,
    },

    /// Access and refresh tokens presented together belong to different users
    #[error("Token subject mismatch")]
    SubjectMismatch,

    #[error("Key load error: {message}")]
    KeyLoadError { message: String },

    #[error("Token generation failed")]
    GenerationFailed,
}

impl TokenError {
    /// Failures caused by the presented token itself, as opposed to server setup
    pub fn is_credential_failure(&self) -> bool {
        !matches!(
            self,
            TokenError::KeyLoadError { .. } | TokenError::GenerationFailed
        )
    }
}

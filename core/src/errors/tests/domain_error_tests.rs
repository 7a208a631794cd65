use crate::domain::entities::token::TokenType;
use crate::errors::{AuthError, DomainError, TokenError};

#[test]
fn test_token_error_converts_into_domain_error() {
    let err: DomainError = TokenError::Expired.into();
    assert_eq!(err.as_token_error(), Some(&TokenError::Expired));
    assert_eq!(err.to_string(), "Token expired");
}

#[test]
fn test_auth_error_converts_into_domain_error() {
    let err: DomainError = AuthError::AuthFailed.into();
    assert!(matches!(err, DomainError::Auth(AuthError::AuthFailed)));
    assert!(err.as_token_error().is_none());
}

#[test]
fn test_wrong_token_type_message_names_both_types() {
    let err = TokenError::WrongTokenType {
        expected: TokenType::Refresh,
        actual: TokenType::Access,
    };
    assert_eq!(err.to_string(), "Wrong token type: expected refresh, got access");
}

#[test]
fn test_credential_failures() {
    assert!(TokenError::Malformed.is_credential_failure());
    assert!(TokenError::Revoked.is_credential_failure());
    assert!(TokenError::SubjectMismatch.is_credential_failure());
    assert!(!TokenError::GenerationFailed.is_credential_failure());
    assert!(!TokenError::KeyLoadError { message: "x".into() }.is_credential_failure());
}

#[test]
fn test_store_unavailable_flag() {
    let err = DomainError::StoreUnavailable {
        message: "connection refused".into(),
    };
    assert!(err.is_store_unavailable());
    assert!(!DomainError::Internal { message: "x".into() }.is_store_unavailable());
}

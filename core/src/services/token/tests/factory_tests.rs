//! Tests for typed token issuance

use chrono::Duration;
use jsonwebtoken::{decode_header, Algorithm};

use af_shared::config::JwtConfig;

use crate::domain::entities::token::TokenType;
use crate::errors::DomainError;
use crate::services::token::{KeyPair, TokenConfig, TokenFactory};
use crate::test_support::{factory, rsa_keys, user, EC_PRIVATE_PEM, EC_PUBLIC_PEM};

const NOW: i64 = 1_700_000_000;

#[test]
fn test_issue_then_verify_for_every_type() {
    let factory = factory();
    let alice = user("alice@example.com");

    for token_type in TokenType::ALL {
        let token = factory.issue_at(&alice, token_type, NOW).unwrap();
        let claims = factory.signer().verify_at(&token, NOW).unwrap();

        assert_eq!(claims.sub, alice.email);
        assert_eq!(claims.user_id, alice.id);
        assert_eq!(claims.token_type, token_type);
    }
}

#[test]
fn test_default_policy_windows() {
    let factory = factory();
    let alice = user("alice@example.com");
    let expected = [
        (TokenType::Access, 15 * 60),
        (TokenType::Refresh, 7 * 24 * 3600),
        (TokenType::Verify, 10 * 24 * 3600),
        (TokenType::ResetPassword, 60 * 60),
    ];

    for (token_type, seconds) in expected {
        let token = factory.issue_at(&alice, token_type, NOW).unwrap();
        let claims = factory.signer().verify_at(&token, NOW).unwrap();
        assert_eq!(claims.exp - claims.iat, seconds, "window for {}", token_type);
        assert_eq!(factory.window_for(token_type).num_seconds(), seconds);
    }
}

#[test]
fn test_windows_are_independently_configurable() {
    let config = TokenConfig::default()
        .with_expiry(TokenType::Access, Duration::seconds(30))
        .with_expiry(TokenType::ResetPassword, Duration::minutes(5));
    let factory = TokenFactory::new(rsa_keys(), config);
    let alice = user("alice@example.com");

    let access = factory.issue_at(&alice, TokenType::Access, NOW).unwrap();
    let reset = factory.issue_at(&alice, TokenType::ResetPassword, NOW).unwrap();
    let refresh = factory.issue_at(&alice, TokenType::Refresh, NOW).unwrap();

    let signer = factory.signer();
    assert_eq!(signer.verify_at(&access, NOW).unwrap().exp, NOW + 30);
    assert_eq!(signer.verify_at(&reset, NOW).unwrap().exp, NOW + 300);
    assert_eq!(signer.verify_at(&refresh, NOW).unwrap().exp, NOW + 7 * 24 * 3600);
}

#[test]
fn test_issue_pair_returns_distinct_verifiable_tokens() {
    let factory = factory();
    let alice = user("alice@example.com");

    let pair = factory.issue_pair_at(&alice, NOW).unwrap();
    assert_ne!(pair.access_token, pair.refresh_token);
    assert_eq!(pair.token_type, "bearer");
    assert_eq!(pair.expires_in, 15 * 60);

    let access = factory.signer().verify_at(&pair.access_token, NOW).unwrap();
    let refresh = factory.signer().verify_at(&pair.refresh_token, NOW).unwrap();
    assert_eq!(access.token_type, TokenType::Access);
    assert_eq!(refresh.token_type, TokenType::Refresh);
    assert_ne!(access.jti, refresh.jti);
}

#[test]
fn test_algorithm_follows_the_key_pair() {
    let keys = KeyPair::from_pem_strings(Algorithm::ES256, EC_PRIVATE_PEM, EC_PUBLIC_PEM).unwrap();
    let factory = TokenFactory::new(keys, TokenConfig::default());
    let alice = user("alice@example.com");

    let token = factory.issue_at(&alice, TokenType::Access, NOW).unwrap();

    assert_eq!(decode_header(&token).unwrap().alg, Algorithm::ES256);
    assert!(factory.signer().verify_at(&token, NOW).is_ok());
}

#[test]
fn test_config_from_jwt_config() {
    let jwt = JwtConfig::default()
        .with_access_expiry_minutes(5)
        .with_refresh_expiry_days(1);
    let config = TokenConfig::from_jwt_config(&jwt).unwrap();

    assert_eq!(config.expiry_for(TokenType::Access), Duration::minutes(5));
    assert_eq!(config.expiry_for(TokenType::Refresh), Duration::days(1));
    assert_eq!(config.expiry_for(TokenType::Verify), Duration::days(10));
    assert_eq!(config.expiry_for(TokenType::ResetPassword), Duration::minutes(60));
}

#[test]
fn test_config_rejects_invalid_jwt_config() {
    let jwt = JwtConfig::default().with_refresh_expiry_days(0);
    assert!(matches!(
        TokenConfig::from_jwt_config(&jwt),
        Err(DomainError::Validation { .. })
    ));
}

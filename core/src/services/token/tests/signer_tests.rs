//! Tests for JWT signing and verification

use chrono::Duration;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::token::{TokenPayload, TokenType};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{JwtSigner, KeyPair};
use crate::test_support::{
    rsa_keys, EC_PRIVATE_PEM, EC_PUBLIC_PEM, RSA_OTHER_PRIVATE_PEM, RSA_PRIVATE_PEM,
};

const NOW: i64 = 1_700_000_000;

fn signer() -> JwtSigner {
    JwtSigner::new(rsa_keys(), Duration::minutes(15))
}

fn payload(token_type: TokenType) -> TokenPayload {
    TokenPayload::new("alice@example.com", Uuid::new_v4(), token_type)
}

#[test]
fn test_sign_then_verify_preserves_payload() {
    let signer = signer();
    for token_type in TokenType::ALL {
        let payload = payload(token_type);
        let token = signer.sign_at(&payload, Some(Duration::hours(1)), NOW).unwrap();
        let claims = signer.verify_at(&token, NOW).unwrap();

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.user_id, payload.user_id);
        assert_eq!(claims.token_type, token_type);
        assert_eq!(claims.iat, NOW);
        assert_eq!(claims.exp, NOW + 3600);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }
}

#[test]
fn test_default_expiry_applies_without_explicit_duration() {
    let signer = signer();
    let token = signer.sign_at(&payload(TokenType::Access), None, NOW).unwrap();
    let claims = signer.verify_at(&token, NOW).unwrap();
    assert_eq!(claims.exp - claims.iat, 15 * 60);
}

#[test]
fn test_sign_with_current_time_verifies_immediately() {
    let signer = signer();
    let token = signer.sign(&payload(TokenType::Access), None).unwrap();
    assert!(signer.verify(&token).is_ok());
}

#[test]
fn test_each_signature_gets_fresh_jti() {
    let signer = signer();
    let payload = payload(TokenType::Access);
    let a = signer.verify_at(&signer.sign_at(&payload, None, NOW).unwrap(), NOW).unwrap();
    let b = signer.verify_at(&signer.sign_at(&payload, None, NOW).unwrap(), NOW).unwrap();
    assert_ne!(a.jti, b.jti);
}

#[test]
fn test_expiry_boundary_is_inclusive() {
    let signer = signer();
    let token = signer
        .sign_at(&payload(TokenType::Access), Some(Duration::seconds(60)), NOW)
        .unwrap();

    assert!(signer.verify_at(&token, NOW + 59).is_ok());
    assert_eq!(signer.verify_at(&token, NOW + 60), Err(TokenError::Expired));
    assert_eq!(signer.verify_at(&token, NOW + 3600), Err(TokenError::Expired));
}

#[test]
fn test_non_positive_lifetime_refused() {
    let result = signer().sign_at(&payload(TokenType::Access), Some(Duration::zero()), NOW);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::GenerationFailed))
    ));
}

#[test]
fn test_swapped_payload_fails_signature() {
    let signer = signer();
    let a = signer.sign_at(&payload(TokenType::Access), None, NOW).unwrap();
    let b = signer.sign_at(&payload(TokenType::Refresh), None, NOW).unwrap();

    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();
    let forged = format!("{}.{}.{}", a_parts[0], b_parts[1], a_parts[2]);

    assert_eq!(signer.verify_at(&forged, NOW), Err(TokenError::SignatureInvalid));
}

#[test]
fn test_token_from_other_key_fails_signature() {
    let other = KeyPair::from_pem_strings(
        Algorithm::RS256,
        RSA_OTHER_PRIVATE_PEM,
        crate::test_support::RSA_PUBLIC_PEM,
    )
    .unwrap();
    let foreign = JwtSigner::new(other, Duration::minutes(15));
    let token = foreign.sign_at(&payload(TokenType::Access), None, NOW).unwrap();

    assert_eq!(signer().verify_at(&token, NOW), Err(TokenError::SignatureInvalid));
}

#[test]
fn test_other_algorithm_fails_signature() {
    let ec = KeyPair::from_pem_strings(Algorithm::ES256, EC_PRIVATE_PEM, EC_PUBLIC_PEM).unwrap();
    let ec_signer = JwtSigner::new(ec, Duration::minutes(15));
    let token = ec_signer.sign_at(&payload(TokenType::Access), None, NOW).unwrap();

    assert!(ec_signer.verify_at(&token, NOW).is_ok());
    assert_eq!(signer().verify_at(&token, NOW), Err(TokenError::SignatureInvalid));
}

#[test]
fn test_hmac_token_rejected() {
    let claims = serde_json::json!({
        "sub": "alice@example.com",
        "user_id": Uuid::new_v4(),
        "type": "access",
        "jti": Uuid::new_v4().to_string(),
        "iat": NOW,
        "exp": NOW + 900,
    });
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"guessable"),
    )
    .unwrap();

    assert_eq!(signer().verify_at(&token, NOW), Err(TokenError::SignatureInvalid));
}

#[test]
fn test_garbage_is_malformed() {
    let signer = signer();
    assert_eq!(signer.verify_at("", NOW), Err(TokenError::Malformed));
    assert_eq!(signer.verify_at("not-a-token", NOW), Err(TokenError::Malformed));
    assert_eq!(signer.verify_at("a.b.c", NOW), Err(TokenError::Malformed));
}

#[test]
fn test_missing_claims_are_malformed() {
    let claims = serde_json::json!({
        "sub": "alice@example.com",
        "jti": Uuid::new_v4().to_string(),
        "iat": NOW,
        "exp": NOW + 900,
    });
    let token = encode(
        &Header::new(Algorithm::RS256),
        &claims,
        &EncodingKey::from_rsa_pem(RSA_PRIVATE_PEM.as_bytes()).unwrap(),
    )
    .unwrap();

    assert_eq!(signer().verify_at(&token, NOW), Err(TokenError::Malformed));
}

#[test]
fn test_unknown_token_type_is_malformed() {
    let claims = serde_json::json!({
        "sub": "alice@example.com",
        "user_id": Uuid::new_v4(),
        "type": "session",
        "jti": Uuid::new_v4().to_string(),
        "iat": NOW,
        "exp": NOW + 900,
    });
    let token = encode(
        &Header::new(Algorithm::RS256),
        &claims,
        &EncodingKey::from_rsa_pem(RSA_PRIVATE_PEM.as_bytes()).unwrap(),
    )
    .unwrap();

    assert_eq!(signer().verify_at(&token, NOW), Err(TokenError::Malformed));
}

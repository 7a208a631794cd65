//! JWT signing and verification
//!
//! Pure and stateless apart from the immutable key pair. Revocation is not
//! consulted here; callers check the revocation store after `verify`.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPayload};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::key_manager::KeyPair;

/// Signs and verifies compact JWS tokens with an asymmetric key pair
#[derive(Debug, Clone)]
pub struct JwtSigner {
    keys: KeyPair,
    default_expiry: Duration,
    validation: Validation,
}

impl JwtSigner {
    /// Creates a signer
    ///
    /// # Arguments
    ///
    /// * `keys` - Key pair; its algorithm is the only one accepted on verify
    /// * `default_expiry` - Lifetime used when `sign` gets no explicit expiry
    pub fn new(keys: KeyPair, default_expiry: Duration) -> Self {
        let mut validation = Validation::new(keys.algorithm());
        // Expiry is checked in `verify_at` with an inclusive boundary and no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            keys,
            default_expiry,
            validation,
        }
    }

    pub fn default_expiry(&self) -> Duration {
        self.default_expiry
    }

    /// Signs `payload`, generating `jti`, `iat` and `exp` from the current time
    pub fn sign(&self, payload: &TokenPayload, expires_in: Option<Duration>) -> DomainResult<String> {
        self.sign_at(payload, expires_in, Utc::now().timestamp())
    }

    /// Signs `payload` as if issued at `now` (Unix seconds)
    pub fn sign_at(
        &self,
        payload: &TokenPayload,
        expires_in: Option<Duration>,
        now: i64,
    ) -> DomainResult<String> {
        let lifetime = expires_in.unwrap_or(self.default_expiry).num_seconds();
        if lifetime <= 0 {
            tracing::error!(lifetime, "Refusing to sign a token with non-positive lifetime");
            return Err(DomainError::Token(TokenError::GenerationFailed));
        }

        let claims = Claims {
            sub: payload.sub.clone(),
            user_id: payload.user_id,
            token_type: payload.token_type,
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + lifetime,
        };

        encode(&Header::new(self.keys.algorithm()), &claims, self.keys.encoding_key()).map_err(
            |e| {
                tracing::error!(error = %e, "Failed to encode JWT");
                DomainError::Token(TokenError::GenerationFailed)
            },
        )
    }

    /// Verifies signature and expiry against the current time
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies signature and expiry as of `now` (Unix seconds)
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid and `now < exp`
    /// * `Err(TokenError::SignatureInvalid)` - Wrong key or unexpected algorithm
    /// * `Err(TokenError::Expired)` - `now >= exp`
    /// * `Err(TokenError::Malformed)` - Anything that does not parse into `Claims`
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, self.keys.decoding_key(), &self.validation)
            .map_err(|e| map_decode_error(e.kind()))?;

        let claims = data.claims;
        if claims.exp <= claims.iat {
            return Err(TokenError::Malformed);
        }
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::SignatureInvalid,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

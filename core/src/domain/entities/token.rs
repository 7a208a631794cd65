//! Token entities for JWT-based authentication.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value of the `token_type` field returned to clients
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Kind of token, carried in the `type` claim
///
/// The kind decides the expiry window at issuance and where the token is
/// accepted: only `access` tokens authorize API calls and only `refresh`
/// tokens can be exchanged for a new pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenType {
    Access,
    Refresh,
    Verify,
    ResetPassword,
}

impl TokenType {
    pub const ALL: [TokenType; 4] = [
        TokenType::Access,
        TokenType::Refresh,
        TokenType::Verify,
        TokenType::ResetPassword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
            TokenType::Verify => "verify",
            TokenType::ResetPassword => "reset-password",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields a caller supplies when signing; the signer adds `jti`, `iat`, `exp`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    /// Principal (the user's email)
    pub sub: String,
    pub user_id: Uuid,
    pub token_type: TokenType,
}

impl TokenPayload {
    pub fn new(sub: impl Into<String>, user_id: Uuid, token_type: TokenType) -> Self {
        Self {
            sub: sub.into(),
            user_id,
            token_type,
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,

    /// User UUID
    pub user_id: Uuid,

    /// Token kind
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// JWT ID, fresh UUIDv4 per issuance and the revocation key
    pub jti: String,

    /// Issued at, Unix seconds
    pub iat: i64,

    /// Expiration, Unix seconds
    pub exp: i64,
}

impl Claims {
    /// Expired once `now` reaches `exp`
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Seconds of validity left at `now`, clamped to zero
    pub fn remaining_seconds(&self, now: i64) -> i64 {
        (self.exp - now).max(0)
    }
}

/// Access and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Always "bearer"
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: i64) -> Claims {
        Claims {
            sub: "user@example.com".to_string(),
            user_id: Uuid::new_v4(),
            token_type: TokenType::Access,
            jti: Uuid::new_v4().to_string(),
            iat: exp - 900,
            exp,
        }
    }

    #[test]
    fn test_token_type_wire_names() {
        for token_type in TokenType::ALL {
            let json = serde_json::to_string(&token_type).unwrap();
            assert_eq!(json, format!("\"{}\"", token_type.as_str()));
        }
    }

    #[test]
    fn test_claims_serialize_type_field() {
        let value = serde_json::to_value(claims(1_000)).unwrap();
        assert_eq!(value["type"], "access");
        assert!(value.get("token_type").is_none());
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let c = claims(1_000);
        assert!(!c.is_expired_at(999));
        assert!(c.is_expired_at(1_000));
        assert_eq!(c.remaining_seconds(990), 10);
        assert_eq!(c.remaining_seconds(2_000), 0);
    }

    #[test]
    fn test_pair_is_bearer() {
        let pair = TokenPair::new("a".into(), "r".into(), 900);
        assert_eq!(pair.token_type, "bearer");
    }
}

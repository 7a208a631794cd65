//! Authentication and token configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// JWT signing and expiry configuration
///
/// Each token type carries its own expiry window. The key pair is always
/// asymmetric; the algorithm name is resolved by the token engine.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Algorithm name (RS256, RS384, RS512, PS256, ES256, ES384, EdDSA, ...)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Path to the PEM-encoded private key
    pub private_key_path: String,

    /// Path to the PEM-encoded public key
    pub public_key_path: String,

    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_expire_days: i64,

    /// Email verification token lifetime in days
    pub verify_token_expire_days: i64,

    /// Password reset token lifetime in minutes
    pub resetpass_token_expire_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            private_key_path: String::from("core/keys/private_key.pem"),
            public_key_path: String::from("core/keys/public_key.pem"),
            access_token_expire_minutes: 15,
            refresh_token_expire_days: 7,
            verify_token_expire_days: 10,
            resetpass_token_expire_minutes: 60,
        }
    }
}

impl JwtConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            algorithm: env_or("JWT_ALGORITHM", defaults.algorithm),
            private_key_path: env_or("JWT_PRIVATE_KEY_PATH", defaults.private_key_path),
            public_key_path: env_or("JWT_PUBLIC_KEY_PATH", defaults.public_key_path),
            access_token_expire_minutes: env_or(
                "JWT_ACCESS_TOKEN_EXPIRE_MINUTES",
                defaults.access_token_expire_minutes,
            ),
            refresh_token_expire_days: env_or(
                "JWT_REFRESH_TOKEN_EXPIRE_DAYS",
                defaults.refresh_token_expire_days,
            ),
            verify_token_expire_days: env_or(
                "JWT_VERIFY_TOKEN_EXPIRE_DAYS",
                defaults.verify_token_expire_days,
            ),
            resetpass_token_expire_minutes: env_or(
                "JWT_RESETPASS_TOKEN_EXPIRE_MINUTES",
                defaults.resetpass_token_expire_minutes,
            ),
        }
    }

    /// Set the key file paths
    pub fn with_key_paths(
        mut self,
        private_key_path: impl Into<String>,
        public_key_path: impl Into<String>,
    ) -> Self {
        self.private_key_path = private_key_path.into();
        self.public_key_path = public_key_path.into();
        self
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expire_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expire_days = days;
        self
    }

    /// Check that every expiry window is positive and the algorithm is asymmetric
    pub fn validate(&self) -> Result<(), String> {
        if self.algorithm.to_uppercase().starts_with("HS") {
            return Err(format!(
                "JWT_ALGORITHM {} is symmetric; an asymmetric algorithm is required",
                self.algorithm
            ));
        }

        let windows = [
            ("JWT_ACCESS_TOKEN_EXPIRE_MINUTES", self.access_token_expire_minutes),
            ("JWT_REFRESH_TOKEN_EXPIRE_DAYS", self.refresh_token_expire_days),
            ("JWT_VERIFY_TOKEN_EXPIRE_DAYS", self.verify_token_expire_days),
            ("JWT_RESETPASS_TOKEN_EXPIRE_MINUTES", self.resetpass_token_expire_minutes),
        ];
        for (name, value) in windows {
            if value <= 0 {
                return Err(format!("{} must be positive, got {}", name, value));
            }
        }

        Ok(())
    }
}

/// Credentials for the administrator created at first start-up
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FirstAdminConfig {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Optional administrator seed
    #[serde(default)]
    pub first_admin: Option<FirstAdminConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
            first_admin: None,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    ///
    /// `FIRST_ADMIN` and `FIRST_ADMIN_PASSWORD` must be set together; a lone
    /// value is reported by [`AuthConfig::validate`].
    pub fn from_env() -> Self {
        let admin_email = std::env::var("FIRST_ADMIN").ok().filter(|v| !v.is_empty());
        let admin_password = std::env::var("FIRST_ADMIN_PASSWORD")
            .ok()
            .filter(|v| !v.is_empty());

        let first_admin = match (admin_email, admin_password) {
            (Some(email), Some(password)) => Some(FirstAdminConfig { email, password }),
            (Some(email), None) => Some(FirstAdminConfig {
                email,
                password: String::new(),
            }),
            (None, Some(password)) => Some(FirstAdminConfig {
                email: String::new(),
                password,
            }),
            (None, None) => None,
        };

        Self {
            jwt: JwtConfig::from_env(),
            bcrypt_cost: env_or("BCRYPT_COST", default_bcrypt_cost()),
            first_admin,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.jwt.validate()?;

        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(format!("BCRYPT_COST must be within 4..=31, got {}", self.bcrypt_cost));
        }

        if let Some(admin) = &self.first_admin {
            if admin.email.is_empty() || admin.password.is_empty() {
                return Err(
                    "FIRST_ADMIN and FIRST_ADMIN_PASSWORD must be set together".to_string(),
                );
            }
        }

        Ok(())
    }
}

fn default_algorithm() -> String {
    String::from("RS256")
}

fn default_bcrypt_cost() -> u32 {
    12
}

//! Asymmetric key management for JWT signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use af_shared::config::JwtConfig;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::errors::{DomainError, TokenError};

/// Key family an algorithm belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyFamily {
    Rsa,
    EllipticCurve,
    Edwards,
}

impl KeyFamily {
    fn of(algorithm: Algorithm) -> Result<Self, DomainError> {
        match algorithm {
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => Ok(KeyFamily::Rsa),
            Algorithm::ES256 | Algorithm::ES384 => Ok(KeyFamily::EllipticCurve),
            Algorithm::EdDSA => Ok(KeyFamily::Edwards),
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Err(key_error(format!(
                "{:?} is a symmetric algorithm; an asymmetric key pair is required",
                algorithm
            ))),
        }
    }
}

/// Immutable signing/verification key pair
///
/// Loaded once at start-up and shared read-only. Rotation means building a
/// new pair and a new signer around it.
#[derive(Clone)]
pub struct KeyPair {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    private_key_path: PathBuf,
    public_key_path: PathBuf,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("algorithm", &self.algorithm)
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .finish()
    }
}

impl KeyPair {
    /// Loads a key pair from PEM files
    ///
    /// # Arguments
    ///
    /// * `algorithm` - Asymmetric JWS algorithm the keys are used with
    /// * `private_key_path` - Path to the PEM-encoded private key file
    /// * `public_key_path` - Path to the PEM-encoded public key file
    ///
    /// # Returns
    ///
    /// * `Ok(KeyPair)` - Keys parsed for the algorithm's family
    /// * `Err(DomainError)` - Unreadable file, wrong key type, or symmetric algorithm
    pub fn new<P: AsRef<Path>>(
        algorithm: Algorithm,
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, DomainError> {
        let private_key_path = private_key_path.as_ref().to_path_buf();
        let public_key_path = public_key_path.as_ref().to_path_buf();

        let private_key_pem = fs::read(&private_key_path).map_err(|e| {
            key_error(format!(
                "Failed to read private key {}: {}",
                private_key_path.display(),
                e
            ))
        })?;
        let public_key_pem = fs::read(&public_key_path).map_err(|e| {
            key_error(format!(
                "Failed to read public key {}: {}",
                public_key_path.display(),
                e
            ))
        })?;

        let (encoding_key, decoding_key) =
            parse_keys(algorithm, &private_key_pem, &public_key_pem)?;

        tracing::info!(
            algorithm = ?algorithm,
            private_key = %private_key_path.display(),
            public_key = %public_key_path.display(),
            "Loaded JWT key pair"
        );

        Ok(Self {
            algorithm,
            encoding_key,
            decoding_key,
            private_key_path,
            public_key_path,
        })
    }

    /// Loads the key pair named by the JWT configuration
    pub fn from_config(config: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = parse_algorithm(&config.algorithm)?;
        Self::new(algorithm, &config.private_key_path, &config.public_key_path)
    }

    /// Creates a key pair from PEM strings (useful for testing or embedded keys)
    pub fn from_pem_strings(
        algorithm: Algorithm,
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, DomainError> {
        let (encoding_key, decoding_key) = parse_keys(
            algorithm,
            private_key_pem.as_bytes(),
            public_key_pem.as_bytes(),
        )?;

        Ok(Self {
            algorithm,
            encoding_key,
            decoding_key,
            private_key_path: PathBuf::from("memory"),
            public_key_path: PathBuf::from("memory"),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Returns the paths to the key files
    pub fn key_paths(&self) -> (&Path, &Path) {
        (&self.private_key_path, &self.public_key_path)
    }
}

/// Parses an algorithm name such as "RS256" or "EdDSA"
pub fn parse_algorithm(name: &str) -> Result<Algorithm, DomainError> {
    let algorithm: Algorithm = name
        .trim()
        .parse()
        .map_err(|_| key_error(format!("Unknown JWT algorithm: {}", name)))?;
    KeyFamily::of(algorithm)?;
    Ok(algorithm)
}

fn parse_keys(
    algorithm: Algorithm,
    private_key_pem: &[u8],
    public_key_pem: &[u8],
) -> Result<(EncodingKey, DecodingKey), DomainError> {
    let (encoding, decoding) = match KeyFamily::of(algorithm)? {
        KeyFamily::Rsa => (
            EncodingKey::from_rsa_pem(private_key_pem),
            DecodingKey::from_rsa_pem(public_key_pem),
        ),
        KeyFamily::EllipticCurve => (
            EncodingKey::from_ec_pem(private_key_pem),
            DecodingKey::from_ec_pem(public_key_pem),
        ),
        KeyFamily::Edwards => (
            EncodingKey::from_ed_pem(private_key_pem),
            DecodingKey::from_ed_pem(public_key_pem),
        ),
    };

    let encoding_key =
        encoding.map_err(|e| key_error(format!("Invalid private key format: {}", e)))?;
    let decoding_key =
        decoding.map_err(|e| key_error(format!("Invalid public key format: {}", e)))?;

    Ok((encoding_key, decoding_key))
}

fn key_error(message: String) -> DomainError {
    DomainError::Token(TokenError::KeyLoadError { message })
}

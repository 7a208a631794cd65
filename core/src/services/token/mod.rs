//! Token engine
//!
//! - Key pair loading for asymmetric JWS algorithms
//! - Signing and verification with an inclusive expiry boundary
//! - Typed issuance with a per-type expiry policy

mod config;
mod factory;
mod key_manager;
mod signer;

#[cfg(test)]
mod tests;

pub use config::TokenConfig;
pub use factory::TokenFactory;
pub use key_manager::{parse_algorithm, KeyPair};
pub use signer::JwtSigner;

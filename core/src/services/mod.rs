//! Business services containing domain logic and use cases.

pub mod auth;
pub mod revocation;
pub mod token;

pub use auth::{AuthService, AuthServiceConfig};
pub use revocation::{KeyValueCache, RevocationStore};
pub use token::{JwtSigner, KeyPair, TokenConfig, TokenFactory};

//! Token revocation list
//!
//! Records are keyed `blacklist:<jti>` and expire together with the token
//! they block.

mod store;
mod traits;


pub use store::{RevocationStore, REVOCATION_KEY_PREFIX, REVOKED_MARKER};
pub use traits::KeyValueCache;

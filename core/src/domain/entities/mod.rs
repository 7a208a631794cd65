//! Domain entities representing core business objects.

pub mod token;
pub mod user;

pub use token::{Claims, TokenPair, TokenPayload, TokenType, BEARER_TOKEN_TYPE};
pub use user::{User, UserRole};

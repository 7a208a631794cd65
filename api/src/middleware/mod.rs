pub mod auth;
pub mod cors;

pub use auth::{AuthContext, JwtAuth, RequestAuthenticator};
pub use cors::create_cors;

pub mod auth;
pub mod user;

pub use af_shared::errors::ErrorResponse;
pub use auth::*;
pub use user::*;

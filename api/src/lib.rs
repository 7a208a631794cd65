//! HTTP surface of the AuthFlow backend
//!
//! Library exports for the binary and the HTTP tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::auth::AppState;

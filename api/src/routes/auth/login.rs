use actix_web::{web, HttpResponse};

use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, ErrorContext};

use af_core::{KeyValueCache, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Exchanges email and password for an access/refresh token pair.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "bearer",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: "Incorrect email or password" for any credential failure
pub async fn login<U, C>(
    state: web::Data<AppState<U, C>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: KeyValueCache + 'static,
{
    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(&error, ErrorContext::Login),
    }
}

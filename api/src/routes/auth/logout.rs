use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::LogoutRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response, ErrorContext};
use crate::middleware::auth::AuthContext;

use af_core::{KeyValueCache, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the bearer access token and the refresh token from the body.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// ## Success (204 No Content)
///
/// ## Errors
/// - 403 Forbidden: Missing or invalid tokens, or tokens of different users
/// - 503 Service Unavailable: Revocation could not be recorded
pub async fn logout<U, C>(
    state: web::Data<AppState<U, C>>,
    auth: AuthContext,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: KeyValueCache + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .logout(&auth.access_token, &request.refresh_token)
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(&error, ErrorContext::Protected),
    }
}

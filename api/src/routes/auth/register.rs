use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::RegisterRequest;
use crate::dto::user::UserPublic;
use crate::handlers::error::{handle_domain_error, validation_error_response, ErrorContext};

use af_core::{KeyValueCache, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "password": "secret1" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "id": "6f1c...", "email": "alice@example.com" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid email or password length, or email already registered
pub async fn register<U, C>(
    state: web::Data<AppState<U, C>>,
    request: web::Json<RegisterRequest>,
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
        .register(&request.email, &request.password)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(UserPublic::from(&user)),
        Err(error) => handle_domain_error(&error, ErrorContext::Register),
    }
}

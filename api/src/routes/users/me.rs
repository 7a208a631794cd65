use actix_web::{web, HttpResponse};

use crate::dto::user::UserResponse;
use crate::handlers::error::{handle_domain_error, ErrorContext};
use crate::middleware::auth::AuthContext;
use crate::routes::auth::AppState;

use af_core::{KeyValueCache, UserRepository};

/// Handler for GET /api/v1/users/me
///
/// ## Errors
/// - 403 Forbidden: Missing or invalid access token
/// - 404 Not Found: The token's user no longer exists
/// - 400 Bad Request: The account is inactive
pub async fn read_current_user<U, C>(
    state: web::Data<AppState<U, C>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: KeyValueCache + 'static,
{
    match state.auth_service.current_user(&auth.claims).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(&user)),
        Err(error) => handle_domain_error(&error, ErrorContext::Protected),
    }
}

//! Application factory
//!
//! Builds the Actix-web application from shared state so `main` and the
//! HTTP tests run the exact same routing and middleware.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::JsonPayloadError,
    middleware::Logger,
    web, App, Error, HttpRequest, HttpResponse,
};

use af_core::{KeyValueCache, UserRepository};
use af_shared::config::CorsConfig;

use crate::handlers::error::ApiError;
use crate::middleware::{auth::JwtAuth, cors::create_cors, RequestAuthenticator};
use crate::routes::auth::{login::login, logout::logout, refresh::refresh, register::register, AppState};
use crate::routes::users::me::read_current_user;

/// Create and configure the application with all dependencies
pub fn create_app<U, C>(
    app_state: web::Data<AppState<U, C>>,
    cors: &CorsConfig,
    api_prefix: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: KeyValueCache + 'static,
{
    let authenticator: Arc<dyn RequestAuthenticator> = app_state.auth_service.clone();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::from(authenticator))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(create_cors(cors))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope(api_prefix)
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<U, C>))
                        .route("/login", web::post().to(login::<U, C>))
                        .route("/refresh", web::post().to(refresh::<U, C>))
                        .route(
                            "/logout",
                            web::post().to(logout::<U, C>).wrap(JwtAuth::new()),
                        ),
                )
                .service(
                    web::scope("/users").route(
                        "/me",
                        web::get().to(read_current_user::<U, C>).wrap(JwtAuth::new()),
                    ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "authflow-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "NOT_FOUND",
        "message": "The requested resource was not found"
    }))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    log::debug!("Rejected request body: {}", err);
    ApiError::bad_request("Invalid request body").into()
}

//! Mapping from domain errors to HTTP responses
//!
//! Every handler funnels failures through here so that credential
//! failures look the same no matter which check rejected them.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use af_core::errors::{AuthError, DomainError};
use af_shared::errors::{error_codes, ErrorResponse};
use validator::ValidationErrors;

pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";
pub const INCORRECT_LOGIN: &str = "Incorrect email or password";
pub const USER_EXISTS: &str = "The user with this email already exists in the system.";
pub const INACTIVE_USER: &str = "Inactive user";
pub const USER_NOT_FOUND: &str = "User not found";
pub const STORE_UNAVAILABLE: &str = "Service temporarily unavailable, please retry";
pub const INTERNAL_ERROR: &str = "An internal error occurred";

/// Which endpoint family an error came from
///
/// The same domain error maps to different statuses per endpoint: a bad
/// refresh token is a 401, a bad access token on a protected route a 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext {
    Register,
    Login,
    Refresh,
    Protected,
}

/// Error rendered as the shared `ErrorResponse` JSON body
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Uniform rejection of a missing, invalid, expired or revoked access token
    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, error_codes::FORBIDDEN, INVALID_CREDENTIALS)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            INTERNAL_ERROR,
        )
    }

    pub fn from_domain(error: &DomainError, context: ErrorContext) -> Self {
        match error {
            DomainError::Token(token_error) if !token_error.is_credential_failure() => {
                log::error!("Token engine failure: {}", token_error);
                Self::internal()
            }
            DomainError::Token(_) | DomainError::Auth(AuthError::InvalidUser) => {
                Self::credentials_rejected(context)
            }
            DomainError::Auth(AuthError::AuthFailed) => {
                Self::new(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, INCORRECT_LOGIN)
            }
            DomainError::Auth(AuthError::InactiveAccount) => match context {
                ErrorContext::Login => {
                    Self::new(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, INCORRECT_LOGIN)
                }
                _ => Self::new(StatusCode::BAD_REQUEST, error_codes::INACTIVE_USER, INACTIVE_USER),
            },
            DomainError::Auth(AuthError::UserNotFound) => {
                Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, USER_NOT_FOUND)
            }
            DomainError::Auth(AuthError::UserAlreadyExists) => {
                Self::new(StatusCode::BAD_REQUEST, error_codes::USER_EXISTS, USER_EXISTS)
            }
            DomainError::Validation { message } => {
                Self::new(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message.clone())
            }
            DomainError::StoreUnavailable { message } => {
                log::warn!("Revocation store unavailable: {}", message);
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    error_codes::SERVICE_UNAVAILABLE,
                    STORE_UNAVAILABLE,
                )
            }
            DomainError::Internal { message } => {
                log::error!("Internal error: {}", message);
                Self::internal()
            }
        }
    }

    fn credentials_rejected(context: ErrorContext) -> Self {
        match context {
            ErrorContext::Refresh => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::UNAUTHORIZED,
                INVALID_CREDENTIALS,
            ),
            _ => Self::forbidden(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ErrorResponse::new(self.code, self.message.clone()))
    }
}

/// Handle domain errors and convert them to the response for `context`
pub fn handle_domain_error(error: &DomainError, context: ErrorContext) -> HttpResponse {
    log::debug!("Domain error in {:?}: {:?}", context, error);
    ApiError::from_domain(error, context).error_response()
}

/// 400 response listing the offending request fields
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    let body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
        .add_detail("fields", fields);
    HttpResponse::BadRequest().json(body)
}

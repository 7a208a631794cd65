//! Bearer token authentication middleware for protected endpoints.
//!
//! Extracts the access token from the Authorization header, runs it through
//! the request authenticator (signature, expiry, revocation, type) and
//! injects the resulting [`AuthContext`] into the request. Every failure,
//! including an unreachable revocation store, is the same 403.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use af_core::{AuthService, Claims, DomainResult, KeyValueCache, UserRepository};

use crate::handlers::error::ApiError;

/// Authenticated principal of a request
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Verified claims of the access token
    pub claims: Claims,
    /// The raw access token, needed again by logout
    pub access_token: String,
}

/// Validates the access token of an incoming request
///
/// Registered as `web::Data<dyn RequestAuthenticator>` so the middleware
/// stays independent of the repository and cache types.
#[async_trait]
pub trait RequestAuthenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> DomainResult<Claims>;
}

#[async_trait]
impl<U, C> RequestAuthenticator for AuthService<U, C>
where
    U: UserRepository + 'static,
    C: KeyValueCache + 'static,
{
    async fn authenticate(&self, token: &str) -> DomainResult<Claims> {
        self.authenticate_request(token).await
    }
}

/// Bearer authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Bearer authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = req
            .app_data::<web::Data<dyn RequestAuthenticator>>()
            .cloned();

        Box::pin(async move {
            let Some(authenticator) = authenticator else {
                log::error!("No request authenticator registered");
                return Err(ApiError::internal().into());
            };

            let Some(token) = extract_bearer_token(&req) else {
                return Err(ApiError::forbidden().into());
            };

            let claims = match authenticator.authenticate(&token).await {
                Ok(claims) => claims,
                Err(e) if e.is_store_unavailable() => {
                    log::warn!("Rejecting request, revocation store unavailable: {}", e);
                    return Err(ApiError::forbidden().into());
                }
                Err(e) => {
                    log::debug!("Access token rejected: {}", e);
                    return Err(ApiError::forbidden().into());
                }
            };

            req.extensions_mut().insert(AuthContext {
                claims,
                access_token: token,
            });

            service.call(req).await
        })
    }
}

/// Extracts the token of a `Bearer` Authorization header; the scheme is case-insensitive
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::forbidden().into());

        ready(result)
    }
}

//! CORS middleware configuration for cross-origin requests.
//!
//! Origins come from configuration plus the frontend host; credentials are
//! allowed so browser clients can send the Authorization header.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use af_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(config.max_age)
        .supports_credentials();

    for origin in config.all_origins() {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(&origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    fn config() -> CorsConfig {
        CorsConfig {
            allowed_origins: vec!["https://app.example.com/".to_string()],
            ..CorsConfig::default()
        }
    }

    #[actix_web::test]
    async fn test_allowed_origin_is_echoed() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config()))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://app.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.com"
        );
    }

    #[actix_web::test]
    async fn test_frontend_host_is_allowed() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config()))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[actix_web::test]
    async fn test_unknown_origin_is_rejected() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config()))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example.com"))
            .to_request();
        let resp = test::try_call_service(&app, req).await;

        if let Ok(resp) = resp {
            assert!(!resp
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        }
    }
}

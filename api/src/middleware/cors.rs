//! CORS middleware configuration for browser clients.
//!
//! Origins come from [`CorsConfig`]; a `*` entry turns on the permissive
//! development setup, otherwise only the listed origins are accepted.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use sr_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let base = if config.allows_any_origin() {
        tracing::info!(event = "cors_configured", mode = "any_origin", "Configuring permissive CORS");
        Cors::default().allow_any_origin()
    } else {
        tracing::info!(
            event = "cors_configured",
            mode = "allow_list",
            origins = ?config.allowed_origins,
            "Configuring CORS allow list"
        );
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    let cors = base
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(config.max_age);

    // Credentials cannot be combined with a wildcard origin
    if config.allow_credentials && !config.allows_any_origin() {
        cors.supports_credentials()
    } else {
        cors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_allow_list_accepts_listed_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".to_string()],
            allow_credentials: true,
            max_age: 600,
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://app.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.com"
        );
    }

    #[actix_web::test]
    async fn test_development_cors_allows_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&CorsConfig::development()))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}

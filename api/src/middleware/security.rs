//! Security middleware for HTTPS enforcement and response hardening.
//!
//! Production requests must arrive over HTTPS, either directly or through a
//! trusted proxy that sets `X-Forwarded-Proto`. Responses then carry the
//! usual hardening headers.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorForbidden,
    http::header::{HeaderName, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use sr_shared::config::Environment;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none';"),
];

/// Security middleware factory
#[derive(Debug, Clone)]
pub struct SecurityMiddleware {
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Vec<String>,
}

impl SecurityMiddleware {
    /// Full enforcement in production, pass-through elsewhere.
    ///
    /// Trusted proxies are read from the comma-separated `TRUSTED_PROXIES` variable.
    pub fn for_environment(environment: Environment) -> Self {
        let trusted_proxies = std::env::var("TRUSTED_PROXIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let middleware = Self {
            enforce_https: environment.is_production(),
            add_security_headers: environment.is_production(),
            trusted_proxies,
        };

        tracing::info!(
            event = "security_middleware_configured",
            environment = %environment,
            enforce_https = middleware.enforce_https,
            add_headers = middleware.add_security_headers,
            trusted_proxies = ?middleware.trusted_proxies,
            "Security middleware configured"
        );

        middleware
    }

    /// Adds a trusted proxy address
    pub fn with_trusted_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.trusted_proxies.push(proxy.into());
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            enforce_https: self.enforce_https,
            add_security_headers: self.add_security_headers,
            trusted_proxies: Rc::new(self.trusted_proxies.clone()),
        }))
    }
}

pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let enforce_https = self.enforce_https;
        let add_security_headers = self.add_security_headers;
        let trusted_proxies = Rc::clone(&self.trusted_proxies);

        Box::pin(async move {
            if enforce_https && !is_secure_request(&req, &trusted_proxies) {
                tracing::warn!(
                    event = "insecure_request_blocked",
                    method = %req.method(),
                    path = req.path(),
                    "Insecure request blocked"
                );
                return Err(ErrorForbidden("HTTPS required"));
            }

            let mut response = service.call(req).await?;

            if add_security_headers {
                let headers = response.headers_mut();
                for (name, value) in SECURITY_HEADERS {
                    headers.insert(HeaderName::from_static(*name), HeaderValue::from_static(*value));
                }
            }

            Ok(response)
        })
    }
}

/// TLS on this listener, HTTPS behind a trusted proxy, or a loopback peer
fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[String]) -> bool {
    if req.app_config().secure() {
        return true;
    }

    let Some(peer) = req.peer_addr() else {
        return false;
    };
    if peer.ip().is_loopback() {
        return true;
    }

    // X-Forwarded-Proto is only honoured when the peer is a known proxy
    let forwarded_https = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|proto| proto.eq_ignore_ascii_case("https"))
        .unwrap_or(false);
    let peer_ip = peer.ip().to_string();
    forwarded_https && trusted_proxies.iter().any(|trusted| *trusted == peer_ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_production_blocks_plain_http_from_remote_host() {
        let app = test::init_service(
            App::new()
                .wrap(SecurityMiddleware::for_environment(Environment::Production))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("host", "api.example.com"))
            .to_request();
        let result = test::try_call_service(&app, req).await;

        let err = result.err().unwrap();
        assert_eq!(err.as_response_error().status_code(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_production_trusts_forwarded_proto_from_proxy() {
        let app = test::init_service(
            App::new()
                .wrap(SecurityMiddleware::for_environment(Environment::Production).with_trusted_proxy("10.0.0.1"))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("host", "api.example.com"))
            .insert_header(("x-forwarded-proto", "https"))
            .peer_addr("10.0.0.1:40000".parse().unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");
    }

    #[actix_web::test]
    async fn test_development_passes_through() {
        let app = test::init_service(
            App::new()
                .wrap(SecurityMiddleware::for_environment(Environment::Development))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("host", "api.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get("x-frame-options").is_none());
    }
}

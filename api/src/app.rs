//! Application routing and shared state registration
//!
//! Middleware is applied by the caller so that tests can mount the same
//! routes on a bare `App`.

use actix_web::{web, HttpResponse};

use sr_core::repositories::{OtpAttemptRepository, OtpRepository, UserRepository};
use sr_core::services::auth::{EmailServiceTrait, IdentityProviderTrait};
use sr_shared::errors::ErrorResponse;

use crate::handlers::json_error_handler;
use crate::routes::auth::{self, AppState};
use crate::routes::health::{health_check, HealthState};

/// Registers state, the JSON extractor config and every route
pub fn configure_app<U, O, A, E, I>(
    app_state: web::Data<AppState<U, O, A, E, I>>,
    health_state: web::Data<HealthState>,
    max_payload_size: usize,
) -> impl FnOnce(&mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    O: OtpRepository + 'static,
    A: OtpAttemptRepository + 'static,
    E: EmailServiceTrait + 'static,
    I: IdentityProviderTrait + 'static,
{
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(app_state)
            .app_data(health_state)
            .app_data(
                web::JsonConfig::default()
                    .limit(max_payload_size)
                    .error_handler(json_error_handler),
            )
            .route("/health", web::get().to(health_check))
            .service(web::scope("/api/v1").configure(auth::configure::<U, O, A, E, I>))
            .default_service(web::route().to(not_found));
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}

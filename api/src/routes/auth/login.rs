use actix_web::{web, HttpResponse};
use validator::Validate;

use sr_core::repositories::{OtpAttemptRepository, OtpRepository, UserRepository};
use sr_core::services::auth::{EmailServiceTrait, IdentityProviderTrait};
use sr_shared::errors::error_codes;
use sr_shared::types::ApiResponse;

use super::AppState;
use crate::dto::auth::LoginRequest;
use crate::dto::{ErrorResponse, ErrorResponseExt};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/login
///
/// Accepts either `{email, password}` or `{id_token, role?}`. A non-empty
/// `id_token` takes precedence.
pub async fn login<U, O, A, E, I>(
    state: web::Data<AppState<U, O, A, E, I>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    O: OtpRepository + 'static,
    A: OtpAttemptRepository + 'static,
    E: EmailServiceTrait + 'static,
    I: IdentityProviderTrait + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let Some(credentials) = request.into_credentials() else {
        return ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            "Either email and password or id_token is required",
        )
        .to_response(actix_web::http::StatusCode::BAD_REQUEST);
    };

    match state.auth_service.login(credentials).await {
        Ok(auth) => HttpResponse::Ok().json(ApiResponse::success(auth).with_message("Login successfully")),
        Err(e) => handle_domain_error(&e),
    }
}

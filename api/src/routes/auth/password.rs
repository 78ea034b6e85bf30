use actix_web::{web, HttpResponse};
use validator::Validate;

use sr_core::repositories::{OtpAttemptRepository, OtpRepository, UserRepository};
use sr_core::services::auth::{EmailServiceTrait, IdentityProviderTrait};
use sr_shared::types::ApiResponse;

use super::AppState;
use crate::dto::auth::ResetPasswordRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/password/reset
pub async fn reset_password<U, O, A, E, I>(
    state: web::Data<AppState<U, O, A, E, I>>,
    request: web::Json<ResetPasswordRequest>,
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

    match state
        .auth_service
        .reset_password(&request.email, &request.new_password, &request.verify_token)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Password reset successfully")),
        Err(e) => handle_domain_error(&e),
    }
}

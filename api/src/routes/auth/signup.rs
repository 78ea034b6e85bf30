use actix_web::{web, HttpResponse};
use validator::Validate;

use sr_core::repositories::{OtpAttemptRepository, OtpRepository, UserRepository};
use sr_core::services::auth::{EmailServiceTrait, IdentityProviderTrait};
use sr_shared::types::ApiResponse;

use super::AppState;
use crate::dto::auth::{SignupRequest, UserResponse};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/signup
///
/// Creates the account once the email has been verified; 201 with the new user.
pub async fn signup<U, O, A, E, I>(
    state: web::Data<AppState<U, O, A, E, I>>,
    request: web::Json<SignupRequest>,
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

    match state.auth_service.signup(request.into()).await {
        Ok(user) => HttpResponse::Created()
            .json(ApiResponse::success(UserResponse::from(&user)).with_message("User registered successfully")),
        Err(e) => handle_domain_error(&e),
    }
}

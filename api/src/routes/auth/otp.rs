//! OTP request and validation endpoints for signup and password reset

use actix_web::{web, HttpResponse};
use validator::Validate;

use sr_core::domain::entities::otp::OtpPurpose;
use sr_core::repositories::{OtpAttemptRepository, OtpRepository, UserRepository};
use sr_core::services::auth::{EmailServiceTrait, IdentityProviderTrait};
use sr_shared::types::ApiResponse;
use sr_shared::utils::validation::mask_email;

use super::AppState;
use crate::dto::auth::{RequestOtpRequest, RequestOtpResponse, ValidateOtpRequest, ValidateOtpResponse};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/signup/otp
///
/// ```json
/// { "email": "user@example.com" }
/// ```
pub async fn request_signup_otp<U, O, A, E, I>(
    state: web::Data<AppState<U, O, A, E, I>>,
    request: web::Json<RequestOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    O: OtpRepository + 'static,
    A: OtpAttemptRepository + 'static,
    E: EmailServiceTrait + 'static,
    I: IdentityProviderTrait + 'static,
{
    request_otp(&state, request.into_inner(), OtpPurpose::VerifyEmail).await
}

/// Handler for POST /api/v1/auth/signup/otp/validate
///
/// ```json
/// { "email": "user@example.com", "otp": "123456" }
/// ```
pub async fn validate_signup_otp<U, O, A, E, I>(
    state: web::Data<AppState<U, O, A, E, I>>,
    request: web::Json<ValidateOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    O: OtpRepository + 'static,
    A: OtpAttemptRepository + 'static,
    E: EmailServiceTrait + 'static,
    I: IdentityProviderTrait + 'static,
{
    validate_otp(&state, request.into_inner(), OtpPurpose::VerifyEmail).await
}

/// Handler for POST /api/v1/auth/password/otp
pub async fn request_reset_otp<U, O, A, E, I>(
    state: web::Data<AppState<U, O, A, E, I>>,
    request: web::Json<RequestOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    O: OtpRepository + 'static,
    A: OtpAttemptRepository + 'static,
    E: EmailServiceTrait + 'static,
    I: IdentityProviderTrait + 'static,
{
    request_otp(&state, request.into_inner(), OtpPurpose::ResetPassword).await
}

/// Handler for POST /api/v1/auth/password/otp/validate
pub async fn validate_reset_otp<U, O, A, E, I>(
    state: web::Data<AppState<U, O, A, E, I>>,
    request: web::Json<ValidateOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    O: OtpRepository + 'static,
    A: OtpAttemptRepository + 'static,
    E: EmailServiceTrait + 'static,
    I: IdentityProviderTrait + 'static,
{
    validate_otp(&state, request.into_inner(), OtpPurpose::ResetPassword).await
}

async fn request_otp<U, O, A, E, I>(
    state: &AppState<U, O, A, E, I>,
    request: RequestOtpRequest,
    purpose: OtpPurpose,
) -> HttpResponse
where
    U: UserRepository,
    O: OtpRepository,
    A: OtpAttemptRepository,
    E: EmailServiceTrait,
    I: IdentityProviderTrait,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    tracing::info!(
        event = "otp_requested",
        email = %mask_email(&request.email),
        purpose = %purpose,
        "Processing OTP request"
    );

    match state.auth_service.request_otp(&request.email, purpose).await {
        Ok(result) => HttpResponse::Ok().json(
            ApiResponse::success(RequestOtpResponse {
                expires_at: result.expires_at,
            })
            .with_message("OTP email sent successfully"),
        ),
        Err(e) => handle_domain_error(&e),
    }
}

async fn validate_otp<U, O, A, E, I>(
    state: &AppState<U, O, A, E, I>,
    request: ValidateOtpRequest,
    purpose: OtpPurpose,
) -> HttpResponse
where
    U: UserRepository,
    O: OtpRepository,
    A: OtpAttemptRepository,
    E: EmailServiceTrait,
    I: IdentityProviderTrait,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .submit_otp(&request.email, &request.otp, purpose)
        .await
    {
        Ok(verify_token) => HttpResponse::Ok().json(
            ApiResponse::success(ValidateOtpResponse { verify_token }).with_message("OTP validated successfully"),
        ),
        Err(e) => handle_domain_error(&e),
    }
}

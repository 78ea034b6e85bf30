//! Authentication route handlers
//!
//! - Email OTP request and validation for signup and password reset
//! - Signup with a verify token
//! - Login with a password or a Google ID token
//! - Password reset with a verify token

pub mod login;
pub mod otp;
pub mod password;
pub mod signup;

use std::sync::Arc;

use actix_web::web;
use sr_core::repositories::{OtpAttemptRepository, OtpRepository, UserRepository};
use sr_core::services::auth::{AuthService, EmailServiceTrait, IdentityProviderTrait};

/// Application state that holds shared services
pub struct AppState<U, O, A, E, I>
where
    U: UserRepository,
    O: OtpRepository,
    A: OtpAttemptRepository,
    E: EmailServiceTrait,
    I: IdentityProviderTrait,
{
    pub auth_service: Arc<AuthService<U, O, A, E, I>>,
}

impl<U, O, A, E, I> AppState<U, O, A, E, I>
where
    U: UserRepository,
    O: OtpRepository,
    A: OtpAttemptRepository,
    E: EmailServiceTrait,
    I: IdentityProviderTrait,
{
    pub fn new(auth_service: Arc<AuthService<U, O, A, E, I>>) -> Self {
        Self { auth_service }
    }
}

/// Registers the `/auth` scope
pub fn configure<U, O, A, E, I>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    O: OtpRepository + 'static,
    A: OtpAttemptRepository + 'static,
    E: EmailServiceTrait + 'static,
    I: IdentityProviderTrait + 'static,
{
    cfg.service(
        web::scope("/auth")
            .route("/signup/otp", web::post().to(otp::request_signup_otp::<U, O, A, E, I>))
            .route(
                "/signup/otp/validate",
                web::post().to(otp::validate_signup_otp::<U, O, A, E, I>),
            )
            .route("/signup", web::post().to(signup::signup::<U, O, A, E, I>))
            .route("/login", web::post().to(login::login::<U, O, A, E, I>))
            .route("/password/otp", web::post().to(otp::request_reset_otp::<U, O, A, E, I>))
            .route(
                "/password/otp/validate",
                web::post().to(otp::validate_reset_otp::<U, O, A, E, I>),
            )
            .route("/password/reset", web::post().to(password::reset_password::<U, O, A, E, I>)),
    );
}

//! Authentication service module
//!
//! Caller-facing account operations built on the OTP workflow:
//! - requesting and submitting email OTPs
//! - signup and password reset finalized with a verify token
//! - password and Google sign-in issuing session tokens

mod config;
mod password;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::AuthService;
pub use traits::{EmailServiceTrait, IdentityProviderTrait};
pub use types::{LoginCredentials, OtpRequestResult, SignupRequest, VerifiedIdentity};

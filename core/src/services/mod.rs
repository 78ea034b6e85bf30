//! Business services containing domain logic and use cases.

pub mod auth;
pub mod otp;
pub mod token;

pub use auth::{
    AuthService, AuthServiceConfig, EmailServiceTrait, IdentityProviderTrait, LoginCredentials,
    OtpRequestResult, SignupRequest, VerifiedIdentity,
};
pub use otp::{IssuedOtp, OtpService, OtpServiceConfig};
pub use token::{TokenService, TokenServiceConfig};

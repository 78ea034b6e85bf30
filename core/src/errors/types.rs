//! Error enums for the OTP workflow, account operations, session tokens and
//! input validation.

use sr_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Outcomes of the OTP issuer, validator and verify-token exchange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("No pending OTP found")]
    NotFound,

    #[error("OTP has expired")]
    Expired,

    #[error("Invalid OTP")]
    Mismatch,

    #[error("OTP or verify token has already been used")]
    AlreadyConsumed,

    #[error("OTP store unavailable: {message}")]
    PersistenceFailed { message: String },

    #[error("Failed to issue OTP: {message}")]
    IssueFailed { message: String },

    #[error("Failed to deliver OTP email")]
    EmailDeliveryFailed,
}

impl OtpError {
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::NotFound => error_codes::OTP_NOT_FOUND,
            OtpError::Expired => error_codes::OTP_EXPIRED,
            OtpError::Mismatch => error_codes::OTP_INVALID,
            OtpError::AlreadyConsumed => error_codes::OTP_ALREADY_CONSUMED,
            OtpError::PersistenceFailed { .. } => error_codes::SERVICE_UNAVAILABLE,
            OtpError::IssueFailed { .. } => error_codes::SERVICE_UNAVAILABLE,
            OtpError::EmailDeliveryFailed => error_codes::EMAIL_DELIVERY_FAILED,
        }
    }

    /// Text safe to show clients; store failure details stay in the logs
    pub fn client_message(&self) -> String {
        match self {
            OtpError::PersistenceFailed { .. } | OtpError::IssueFailed { .. } => {
                "OTP service temporarily unavailable, please retry".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Store failures are transient; every other outcome needs new input
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OtpError::PersistenceFailed { .. } | OtpError::IssueFailed { .. }
        )
    }
}

/// Account-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("OTP has not been verified")]
    OtpNotVerified,

    #[error("Invalid verify token")]
    InvalidVerifyToken,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Email not found")]
    EmailNotFound,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User is inactive")]
    UserInactive,

    #[error("Invalid role: {role}")]
    InvalidRole { role: String },

    #[error("Invalid identity token")]
    InvalidIdentityToken,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::OtpNotVerified => error_codes::OTP_NOT_VERIFIED,
            AuthError::InvalidVerifyToken => error_codes::VERIFY_TOKEN_INVALID,
            AuthError::EmailAlreadyExists => error_codes::EMAIL_ALREADY_EXISTS,
            AuthError::EmailNotFound => error_codes::EMAIL_NOT_FOUND,
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::UserInactive => error_codes::USER_INACTIVE,
            AuthError::InvalidRole { .. } => error_codes::INVALID_ROLE,
            AuthError::InvalidIdentityToken => error_codes::IDENTITY_TOKEN_INVALID,
        }
    }
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidToken => "TOKEN_INVALID",
            TokenError::TokenGenerationFailed => error_codes::INTERNAL_ERROR,
        }
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("OTP must be {expected} digits")]
    InvalidCodeFormat { expected: usize },

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::InvalidCodeFormat { .. } => "INVALID_OTP_FORMAT",
            ValidationError::PasswordTooShort { .. } => "PASSWORD_TOO_SHORT",
        }
    }
}

impl From<OtpError> for ErrorResponse {
    fn from(err: OtpError) -> Self {
        ErrorResponse::new(err.error_code(), err.client_message())
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}

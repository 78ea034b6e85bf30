//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, OtpError, TokenError, ValidationError};

use sr_shared::errors::{ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Stable code reported to API clients
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Otp(e) => e.error_code(),
            DomainError::Auth(e) => e.error_code(),
            DomainError::Token(e) => e.error_code(),
            DomainError::ValidationErr(e) => e.error_code(),
        }
    }

    /// Whether the caller may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        match self {
            DomainError::Otp(e) => e.is_retryable(),
            _ => false,
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        let message = match self {
            DomainError::Otp(e) => e.client_message(),
            other => other.to_string(),
        };
        let response = ErrorResponse::new(self.error_code(), message);
        if self.is_retryable() {
            response.add_detail("retryable", true)
        } else {
            response
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

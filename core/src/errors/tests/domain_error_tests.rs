//! Unit tests for domain error types

use sr_shared::errors::{ErrorResponse, IntoErrorResponse};

use crate::errors::{AuthError, DomainError, OtpError, TokenError, ValidationError};

#[test]
fn test_otp_error_codes_are_distinct() {
    let errors = [
        OtpError::NotFound,
        OtpError::Expired,
        OtpError::Mismatch,
        OtpError::AlreadyConsumed,
        OtpError::EmailDeliveryFailed,
    ];
    let mut codes: Vec<_> = errors.iter().map(|e| e.error_code()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn test_only_store_failures_are_retryable() {
    assert!(OtpError::PersistenceFailed { message: "down".into() }.is_retryable());
    assert!(OtpError::IssueFailed { message: "deadlock".into() }.is_retryable());
    assert!(!OtpError::Mismatch.is_retryable());
    assert!(!OtpError::Expired.is_retryable());

    let domain: DomainError = OtpError::IssueFailed { message: "x".into() }.into();
    assert!(domain.is_retryable());
    assert!(!DomainError::from(AuthError::InvalidVerifyToken).is_retryable());
}

#[test]
fn test_bridged_error_keeps_inner_message() {
    let error: DomainError = OtpError::Expired.into();
    assert_eq!(error.to_string(), "OTP has expired");
    assert_eq!(error.error_code(), "OTP_EXPIRED");
}

#[test]
fn test_token_error_conversion() {
    let response: ErrorResponse = TokenError::TokenExpired.into();
    assert_eq!(response.error, "TOKEN_EXPIRED");
    assert_eq!(response.message, "Token expired");
}

#[test]
fn test_validation_error_message() {
    let error = ValidationError::InvalidCodeFormat { expected: 6 };
    assert_eq!(error.to_string(), "OTP must be 6 digits");
    let response: ErrorResponse = error.into();
    assert_eq!(response.error, "INVALID_OTP_FORMAT");
}

#[test]
fn test_retryable_detail_in_response() {
    let error: DomainError = OtpError::PersistenceFailed { message: "timeout".into() }.into();
    let response = error.to_error_response();
    assert_eq!(response.error, "SERVICE_UNAVAILABLE");
    assert_eq!(response.details.unwrap()["retryable"], serde_json::json!(true));

    let response = DomainError::from(AuthError::EmailNotFound).to_error_response();
    assert!(response.details.is_none());
}

#[test]
fn test_store_failure_text_stays_out_of_response() {
    let errors = [
        OtpError::PersistenceFailed { message: "pool timed out: mysql://app@10.0.0.5/otp".into() },
        OtpError::IssueFailed { message: "Deadlock found when trying to get lock".into() },
    ];
    for error in errors {
        let response = DomainError::from(error.clone()).to_error_response();
        assert_eq!(response.message, "OTP service temporarily unavailable, please retry");
        assert_eq!(response.details.unwrap()["retryable"], serde_json::json!(true));

        let response: ErrorResponse = error.into();
        assert!(!response.message.contains("10.0.0.5"));
        assert!(!response.message.contains("Deadlock"));
    }
}

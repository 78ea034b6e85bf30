//! Traits for email delivery and external identity verification

use async_trait::async_trait;

use crate::domain::entities::otp::OtpPurpose;

use super::types::VerifiedIdentity;

/// Trait for OTP email delivery
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send `code` to `to_email` from the configured sender
    ///
    /// Returns the provider's message id.
    async fn send_otp_email(&self, to_email: &str, code: &str, purpose: OtpPurpose) -> Result<String, String>;
}

/// Trait for third-party ID token verification
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    /// Verify an ID token and return the identity it asserts
    async fn verify_id_token(&self, id_token: &str) -> Result<VerifiedIdentity, String>;
}

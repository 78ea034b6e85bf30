//! Append-only store of OTP validation attempts.

use async_trait::async_trait;

use crate::domain::entities::otp_attempt::{NewOtpAttempt, OtpAttempt};
use crate::errors::DomainError;

#[async_trait]
pub trait OtpAttemptRepository: Send + Sync {
    /// Append an attempt
    async fn record(&self, attempt: NewOtpAttempt) -> Result<OtpAttempt, DomainError>;

    /// Attempts made against one OTP record, oldest first
    async fn find_by_otp_id(&self, otp_id: i64) -> Result<Vec<OtpAttempt>, DomainError>;
}

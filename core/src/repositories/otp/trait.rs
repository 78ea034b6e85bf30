//! OTP repository trait defining the interface for OTP record persistence.
//!
//! Every state transition is a conditional write so that concurrent requests
//! for the same email and purpose cannot both observe and act on the same
//! pending record.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp::{NewOtpRecord, OtpPurpose, OtpRecord};
use crate::errors::DomainError;

/// Repository trait for OTP record persistence operations
///
/// "Latest" always means the highest `id`. Ids are assigned in insertion
/// order while `issue` holds its lock, so they follow the order in which
/// issuances took effect even when `created_at` stamps do not.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Supersede and insert in one atomic step
    ///
    /// Marks every pending record for `(record.target, record.purpose)` as
    /// verified without a verify token, then inserts `record` as the only
    /// pending one. Either both happen or neither does.
    ///
    /// # Returns
    /// * `Ok(OtpRecord)` - The inserted record with its assigned id
    /// * `Err(DomainError)` - The store rejected the transaction
    async fn issue(&self, record: NewOtpRecord) -> Result<OtpRecord, DomainError>;

    /// Find the latest record for the pair that is still unverified
    async fn find_latest_pending(
        &self,
        target: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// Find the latest record for the pair regardless of state
    async fn find_latest(
        &self,
        target: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// Find a record by id
    async fn find_by_id(&self, id: i64) -> Result<Option<OtpRecord>, DomainError>;

    /// Every record for the pair, latest first
    async fn find_all(&self, target: &str, purpose: OtpPurpose) -> Result<Vec<OtpRecord>, DomainError>;

    /// Mark a record verified and attach its verify token
    ///
    /// Applies only while the record is still unverified.
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the transition
    /// * `Ok(false)` - The record was already verified (or superseded)
    async fn mark_verified(&self, id: i64, verify_token: &str) -> Result<bool, DomainError>;

    /// Stamp the verify token as redeemed
    ///
    /// Applies only while `token_consumed_at` is unset.
    ///
    /// # Returns
    /// * `Ok(true)` - This call redeemed the token
    /// * `Ok(false)` - The token had already been redeemed
    async fn consume_verify_token(&self, id: i64, consumed_at: DateTime<Utc>) -> Result<bool, DomainError>;
}

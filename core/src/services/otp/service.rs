//! Main OTP service implementation

use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::sync::Arc;
use uuid::Uuid;

use sr_shared::utils::validation::mask_email;

use crate::domain::entities::otp::{NewOtpRecord, OtpPurpose, OtpRecord, CODE_LENGTH};
use crate::domain::entities::otp_attempt::{NewOtpAttempt, OtpAttempt};
use crate::errors::{AuthError, DomainError, DomainResult, OtpError};
use crate::repositories::{OtpAttemptRepository, OtpRepository};

use super::config::OtpServiceConfig;
use super::types::IssuedOtp;

/// Issues, validates and exchanges one-time passcodes
///
/// Every check reads the store; nothing is cached in process.
pub struct OtpService<R: OtpRepository, A: OtpAttemptRepository> {
    otp_repository: Arc<R>,
    attempt_repository: Arc<A>,
    config: OtpServiceConfig,
}

impl<R: OtpRepository, A: OtpAttemptRepository> OtpService<R, A> {
    /// Create a new OTP service
    pub fn new(otp_repository: Arc<R>, attempt_repository: Arc<A>, config: OtpServiceConfig) -> Self {
        Self {
            otp_repository,
            attempt_repository,
            config,
        }
    }

    /// Issue a new code for `target` and `purpose`
    ///
    /// Every earlier pending code for the pair becomes permanently unusable
    /// in the same atomic step that stores the new one. The code is returned
    /// to the caller; delivering it is the caller's job.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedOtp)` - The stored record id, the plain code and its expiry
    /// * `Err(OtpError::IssueFailed)` - The store rejected the write; safe to retry
    pub async fn issue_otp(&self, target: &str, purpose: OtpPurpose) -> DomainResult<IssuedOtp> {
        let code = Self::generate_secure_code();
        let new_record = NewOtpRecord::new(
            target,
            purpose,
            code.clone(),
            Duration::minutes(self.config.code_expiration_minutes),
        );

        let record = self.otp_repository.issue(new_record).await.map_err(|e| {
            tracing::error!(
                target_email = %mask_email(target),
                purpose = %purpose,
                error = %e,
                event = "otp_issue_failed",
                "Failed to store OTP"
            );
            OtpError::IssueFailed {
                message: e.to_string(),
            }
        })?;

        tracing::info!(
            target_email = %mask_email(target),
            purpose = %purpose,
            otp_id = record.id,
            expires_at = %record.expires_at,
            event = "otp_issued",
            "Issued new OTP"
        );

        Ok(IssuedOtp {
            otp_id: record.id,
            code,
            expires_at: record.expires_at,
        })
    }

    /// Validate a submitted code against the latest pending record
    ///
    /// Every call that finds a pending record appends exactly one attempt,
    /// successful or not. A mismatch leaves the record pending so the caller
    /// may retry until it expires.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The verify token minted for this record
    /// * `Err(OtpError::NotFound)` - No pending record for the pair
    /// * `Err(OtpError::Expired)` - The record expired; a new code is needed
    /// * `Err(OtpError::Mismatch)` - Wrong code
    /// * `Err(OtpError::AlreadyConsumed)` - A concurrent request solved or superseded it first
    /// * `Err(OtpError::PersistenceFailed)` - The store could not be read or written
    pub async fn validate_otp(
        &self,
        target: &str,
        purpose: OtpPurpose,
        submitted_code: &str,
    ) -> DomainResult<String> {
        let record = self
            .otp_repository
            .find_latest_pending(target, purpose)
            .await
            .map_err(persistence_failed)?
            .ok_or_else(|| {
                tracing::warn!(
                    target_email = %mask_email(target),
                    purpose = %purpose,
                    event = "otp_not_found",
                    "No pending OTP for validation"
                );
                OtpError::NotFound
            })?;

        if record.is_expired_at(Utc::now()) {
            self.log_attempt(&record, submitted_code, false).await;
            tracing::warn!(
                target_email = %mask_email(target),
                purpose = %purpose,
                otp_id = record.id,
                event = "otp_expired",
                "OTP validation after expiry"
            );
            return Err(OtpError::Expired.into());
        }

        if !Self::constant_time_compare(&record.code, submitted_code) {
            self.log_attempt(&record, submitted_code, false).await;
            tracing::warn!(
                target_email = %mask_email(target),
                purpose = %purpose,
                otp_id = record.id,
                event = "otp_mismatch",
                "OTP validation failed"
            );
            return Err(OtpError::Mismatch.into());
        }

        let verify_token = Self::generate_verify_token();
        let transitioned = match self.otp_repository.mark_verified(record.id, &verify_token).await {
            Ok(transitioned) => transitioned,
            Err(e) => {
                self.log_attempt(&record, submitted_code, false).await;
                return Err(persistence_failed(e));
            }
        };

        if !transitioned {
            self.log_attempt(&record, submitted_code, false).await;
            tracing::warn!(
                target_email = %mask_email(target),
                purpose = %purpose,
                otp_id = record.id,
                event = "otp_already_consumed",
                "OTP was verified or superseded by a concurrent request"
            );
            return Err(OtpError::AlreadyConsumed.into());
        }

        self.log_attempt(&record, submitted_code, true).await;
        tracing::info!(
            target_email = %mask_email(target),
            purpose = %purpose,
            otp_id = record.id,
            event = "otp_verified",
            "OTP verified"
        );

        Ok(verify_token)
    }

    /// Check a verify token presented to a downstream operation
    ///
    /// Only the latest record for `(target, purpose)` counts, so a token is
    /// revoked as soon as a newer code is issued for the pair, and a token
    /// minted for one purpose never satisfies the other.
    ///
    /// This does not redeem the token; call [`Self::redeem_verify_token`]
    /// once the downstream operation is ready to commit.
    pub async fn verify_token(
        &self,
        target: &str,
        purpose: OtpPurpose,
        verify_token: &str,
    ) -> DomainResult<OtpRecord> {
        let record = self
            .otp_repository
            .find_latest(target, purpose)
            .await
            .map_err(persistence_failed)?
            .ok_or(OtpError::NotFound)?;

        if !record.is_verified {
            return Err(AuthError::OtpNotVerified.into());
        }

        if !record.verify_token_matches(verify_token) {
            tracing::warn!(
                target_email = %mask_email(target),
                purpose = %purpose,
                otp_id = record.id,
                event = "verify_token_rejected",
                "Verify token does not match latest OTP"
            );
            return Err(AuthError::InvalidVerifyToken.into());
        }

        if self.config.single_use_verify_token && record.token_consumed_at.is_some() {
            return Err(OtpError::AlreadyConsumed.into());
        }

        Ok(record)
    }

    /// Redeem a checked verify token
    ///
    /// A no-op unless single-use tokens are enforced, in which case only the
    /// first redemption of a record succeeds.
    pub async fn redeem_verify_token(&self, record: &OtpRecord) -> DomainResult<()> {
        if !self.config.single_use_verify_token {
            return Ok(());
        }

        let redeemed = self
            .otp_repository
            .consume_verify_token(record.id, Utc::now())
            .await
            .map_err(persistence_failed)?;

        if !redeemed {
            return Err(OtpError::AlreadyConsumed.into());
        }

        tracing::info!(
            otp_id = record.id,
            purpose = %record.purpose,
            event = "verify_token_redeemed",
            "Verify token redeemed"
        );
        Ok(())
    }

    /// Attempts recorded against one OTP record
    pub async fn attempts_for(&self, otp_id: i64) -> DomainResult<Vec<OtpAttempt>> {
        self.attempt_repository
            .find_by_otp_id(otp_id)
            .await
            .map_err(persistence_failed)
    }

    /// Generate a cryptographically secure random 6-digit code
    pub fn generate_secure_code() -> String {
        let code: u32 = OsRng.gen_range(0..10u32.pow(CODE_LENGTH as u32));
        format!("{:0width$}", code, width = CODE_LENGTH)
    }

    /// Generate an opaque verify token (UUID v4, 32 hex characters)
    pub fn generate_verify_token() -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn constant_time_compare(stored: &str, submitted: &str) -> bool {
        if stored.len() != submitted.len() {
            return false;
        }
        constant_time_eq(stored.as_bytes(), submitted.as_bytes())
    }

    /// Best-effort: a failed write is logged and never replaces the validation result
    async fn log_attempt(&self, record: &OtpRecord, submitted_code: &str, success: bool) {
        let attempt = if success {
            NewOtpAttempt::succeeded(record.id, submitted_code)
        } else {
            NewOtpAttempt::failed(record.id, submitted_code)
        };

        if let Err(e) = self.attempt_repository.record(attempt).await {
            tracing::warn!(
                otp_id = record.id,
                success = success,
                error = %e,
                event = "otp_attempt_log_failed",
                "Failed to record OTP attempt"
            );
        }
    }
}

fn persistence_failed(e: DomainError) -> DomainError {
    tracing::error!(error = %e, event = "otp_store_error", "OTP store operation failed");
    OtpError::PersistenceFailed {
        message: e.to_string(),
    }
    .into()
}

//! Audit trail of OTP validation attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One call to the validator against a pending record. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpAttempt {
    pub id: i64,

    /// The record the attempt was made against
    pub otp_id: i64,

    /// Code supplied by the caller
    pub submitted_value: String,

    pub success: bool,

    pub created_at: DateTime<Utc>,
}

/// An attempt about to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOtpAttempt {
    pub otp_id: i64,
    pub submitted_value: String,
    pub success: bool,
    pub created_at: DateTime<Utc>,
}

impl NewOtpAttempt {
    pub fn succeeded(otp_id: i64, submitted_value: impl Into<String>) -> Self {
        Self::new(otp_id, submitted_value, true)
    }

    pub fn failed(otp_id: i64, submitted_value: impl Into<String>) -> Self {
        Self::new(otp_id, submitted_value, false)
    }

    fn new(otp_id: i64, submitted_value: impl Into<String>, success: bool) -> Self {
        Self {
            otp_id,
            submitted_value: submitted_value.into(),
            success,
            created_at: Utc::now(),
        }
    }

    pub fn into_attempt(self, id: i64) -> OtpAttempt {
        OtpAttempt {
            id,
            otp_id: self.otp_id,
            submitted_value: self.submitted_value,
            success: self.success,
            created_at: self.created_at,
        }
    }
}

//! Types for OTP service results

use chrono::{DateTime, Utc};

/// A freshly issued code, to be handed to the email collaborator
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    /// Id of the stored record
    pub otp_id: i64,
    /// The plain code
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

//! One-time passcode records bound to an email address and a purpose.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

/// Length of an OTP code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of an OTP code (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// What an OTP was issued for.
///
/// Codes and verify tokens never cross purposes: every lookup filters on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    /// Proving ownership of an email address before signup
    VerifyEmail,
    /// Authorizing a password reset
    ResetPassword,
}

impl OtpPurpose {
    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::VerifyEmail => "verify_email",
            OtpPurpose::ResetPassword => "reset_password",
        }
    }
}

impl std::fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verify_email" => Ok(OtpPurpose::VerifyEmail),
            "reset_password" => Ok(OtpPurpose::ResetPassword),
            other => Err(format!("Unknown OTP purpose: {}", other)),
        }
    }
}

/// A persisted OTP.
///
/// A record is *pending* while `is_verified` is false. It leaves that state
/// either through a successful validation (which sets `verify_token`) or
/// because a newer code was issued for the same target and purpose (which
/// leaves `verify_token` empty). Records are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Store-assigned identifier, increasing with insertion order
    pub id: i64,

    /// Normalized email address the code was sent to
    pub target: String,

    pub purpose: OtpPurpose,

    /// The 6-digit code
    pub code: String,

    /// The code is unusable at or after this instant
    pub expires_at: DateTime<Utc>,

    pub is_verified: bool,

    /// Set only by a successful validation
    pub verify_token: Option<String>,

    /// When the verify token was redeemed, if single-use tokens are enforced
    pub token_consumed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Whether the code is expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the record can still be validated
    pub fn is_pending(&self) -> bool {
        !self.is_verified
    }

    /// Whether this record was superseded by a later issuance instead of being solved
    pub fn is_superseded(&self) -> bool {
        self.is_verified && self.verify_token.is_none()
    }

    /// Constant-time comparison of a presented verify token
    pub fn verify_token_matches(&self, presented: &str) -> bool {
        match self.verify_token.as_deref() {
            Some(stored) if !presented.is_empty() => {
                stored.len() == presented.len()
                    && constant_time_eq(stored.as_bytes(), presented.as_bytes())
            }
            _ => false,
        }
    }
}

/// An OTP about to be inserted; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOtpRecord {
    pub target: String,
    pub purpose: OtpPurpose,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl NewOtpRecord {
    /// Build a record that expires `ttl` from now
    pub fn new(target: impl Into<String>, purpose: OtpPurpose, code: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            target: target.into(),
            purpose,
            code: code.into(),
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// Materialize with the id the store assigned
    pub fn into_record(self, id: i64) -> OtpRecord {
        OtpRecord {
            id,
            target: self.target,
            purpose: self.purpose,
            code: self.code,
            expires_at: self.expires_at,
            is_verified: false,
            verify_token: None,
            token_consumed_at: None,
            created_at: self.created_at,
        }
    }
}

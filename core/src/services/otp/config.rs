//! Configuration for the OTP service

use sr_shared::config::OtpPolicyConfig;

use crate::domain::entities::otp::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before a code expires
    pub code_expiration_minutes: i64,
    /// Reject a verify token after its first successful use
    pub single_use_verify_token: bool,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            single_use_verify_token: false,
        }
    }
}

impl From<&OtpPolicyConfig> for OtpServiceConfig {
    fn from(policy: &OtpPolicyConfig) -> Self {
        Self {
            code_expiration_minutes: policy.code_expiration_minutes,
            single_use_verify_token: policy.single_use_verify_token,
        }
    }
}

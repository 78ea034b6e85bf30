//! Domain entities representing core business objects.

pub mod otp;
pub mod otp_attempt;
pub mod session;
pub mod user;

#[cfg(test)]
mod tests;

pub use otp::{NewOtpRecord, OtpPurpose, OtpRecord, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};
pub use otp_attempt::{NewOtpAttempt, OtpAttempt};
pub use session::{Claims, SessionToken, SESSION_TOKEN_TYPE};
pub use user::{AuthProvider, Role, User, UserStatus};

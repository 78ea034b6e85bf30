pub mod otp;
pub mod otp_attempt;
pub mod user;

pub use otp::{InMemoryOtpRepository, OtpRepository};
pub use otp_attempt::{InMemoryOtpAttemptRepository, OtpAttemptRepository};
pub use user::{InMemoryUserRepository, UserRepository};

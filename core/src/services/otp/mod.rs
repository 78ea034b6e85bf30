//! OTP verification workflow
//!
//! - issuing a code for an email address and purpose, superseding older ones
//! - validating a submitted code with expiry checks and attempt logging
//! - exchanging a solved code for a verify token and checking that token

mod config;
mod service;
mod types;


pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use types::IssuedOtp;

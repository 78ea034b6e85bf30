//! Third-party identity verification

pub mod google;

pub use google::{GoogleIdentityProvider, GoogleTokenInfo};

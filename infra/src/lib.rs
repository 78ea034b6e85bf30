//! # Infrastructure Layer
//!
//! Concrete adapters for the Smart Restaurant core traits:
//! - **Database**: MySQL repositories for OTP records, attempts and users (SQLx)
//! - **Email**: SendGrid delivery and a logging mock
//! - **OAuth**: Google ID token verification
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use sr_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email delivery providers
pub mod email;

/// Third-party identity verification
pub mod oauth;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded migrations failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider rejected or failed the request
    #[error("Email service error: {0}")]
    Email(String),

    /// Identity provider rejected the token
    #[error("Identity provider error: {0}")]
    Identity(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}

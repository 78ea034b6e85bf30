//! Shared configuration and common types for the Smart Restaurant server
//!
//! - Configuration loaded from the environment
//! - Error response structures and error codes
//! - API response wrappers
//! - Email helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    MailConfig, OtpPolicyConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus};
pub use utils::validation;

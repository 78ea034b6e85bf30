//! Configuration module with business-specific sub-modules
//!
//! - `auth` - session tokens, OTP policy, password hashing, Google sign-in
//! - `database` - MySQL pool configuration
//! - `environment` - environment detection and logging configuration
//! - `mail` - outbound email provider
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod mail;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, GoogleAuthConfig, JwtConfig, OtpPolicyConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::{MailConfig, MailProvider};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Callers are expected to have loaded any `.env` file beforehand.
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            mail: MailConfig::from_env(),
            cors: CorsConfig::from_env(env.is_development()),
            logging: LoggingConfig::from_env(env),
        }
    }

    /// Problems that must be fixed before serving production traffic
    pub fn production_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.auth.jwt.is_using_default_secret() {
            warnings.push("JWT secret is the built-in default");
        }
        if self.mail.is_mock() {
            warnings.push("mail provider is mock; OTP codes will not be delivered");
        }
        if self.cors.allows_any_origin() {
            warnings.push("CORS allows any origin");
        }
        warnings
    }
}

//! Configuration for the authentication service

use sr_shared::config::AuthConfig;

use crate::domain::entities::user::Role;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
    /// Role given to Google accounts created without an explicit role
    pub default_role: String,
    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            default_role: Role::END_USER.to_string(),
            min_password_length: 6,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(auth: &AuthConfig) -> Self {
        Self {
            bcrypt_cost: auth.bcrypt_cost,
            default_role: auth.default_role.clone(),
            ..Default::default()
        }
    }
}

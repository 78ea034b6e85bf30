//! Authentication request and response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use sr_core::domain::entities::user::User;
use sr_core::services::auth::{LoginCredentials, SignupRequest as SignupCommand};

/// Body of `POST .../otp`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestOtpRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestOtpResponse {
    pub expires_at: DateTime<Utc>,
}

/// Body of `POST .../otp/validate`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ValidateOtpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOtpResponse {
    pub verify_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1))]
    pub role: String,
    #[validate(length(min = 1))]
    pub verify_token: String,
}

impl From<SignupRequest> for SignupCommand {
    fn from(request: SignupRequest) -> Self {
        SignupCommand {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
            role: request.role,
            verify_token: request.verify_token,
        }
    }
}

/// Public view of a created account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_id: String,
    pub status: String,
    pub is_active: bool,
    pub provider: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role_id: user.role_id.to_string(),
            status: user.status.as_str().to_string(),
            is_active: user.is_active,
            provider: user.provider.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

/// Either `email` + `password` or `id_token` (Google); `role` applies only
/// to accounts created by a first Google sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: Option<String>,
    pub password: Option<String>,
    pub id_token: Option<String>,
    pub role: Option<String>,
}

impl LoginRequest {
    /// The credentials this body carries, if it carries a usable set
    pub fn into_credentials(self) -> Option<LoginCredentials> {
        match (self.id_token, self.email, self.password) {
            (Some(id_token), _, _) if !id_token.trim().is_empty() => Some(LoginCredentials::Google {
                id_token,
                role: self.role,
            }),
            (_, Some(email), Some(password)) => Some(LoginCredentials::Password { email, password }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub new_password: String,
    #[validate(length(min = 1))]
    pub verify_token: String,
}

//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{SessionToken, User};

/// Returned after a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT for API authentication
    pub access_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    pub user_id: String,

    pub email: String,

    pub role_id: String,

    /// Whether the account was created by this login (first Google sign-in)
    pub is_new_user: bool,
}

impl AuthResponse {
    pub fn new(token: SessionToken, user: &User, is_new_user: bool) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user_id: user.id.to_string(),
            email: user.email.clone(),
            role_id: user.role_id.to_string(),
            is_new_user,
        }
    }
}

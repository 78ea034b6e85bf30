//! Session token payloads.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// Token type reported to clients
pub const SESSION_TOKEN_TYPE: &str = "Bearer";

/// Claims carried by a session JWT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    pub email: String,

    /// Role ID
    pub role: String,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Claims for `user` valid for `lifetime` from now
    pub fn for_user(user: &User, issuer: &str, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role_id.to_string(),
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signed session token handed to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
}

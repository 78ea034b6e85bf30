//! Request and result types for the authentication service

use chrono::{DateTime, Utc};

/// Result of requesting an OTP email
#[derive(Debug, Clone)]
pub struct OtpRequestResult {
    /// Provider message id
    pub message_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Signup payload, finalized with a verify token for the email address
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    /// Role name, e.g. "end_user"
    pub role: String,
    pub verify_token: String,
}

/// Supported sign-in methods
#[derive(Debug, Clone)]
pub enum LoginCredentials {
    Password { email: String, password: String },
    /// Google ID token; `role` applies only when the account is created
    Google { id_token: String, role: Option<String> },
}

/// Identity asserted by a verified third-party ID token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}
